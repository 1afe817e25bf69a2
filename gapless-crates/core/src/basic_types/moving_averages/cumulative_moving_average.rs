use std::fmt::Display;

/// The mean of every term added so far.
#[derive(Default, Debug, Copy, Clone)]
pub struct CumulativeMovingAverage {
    sum: u64,
    num_terms: u64,
}

impl CumulativeMovingAverage {
    pub(crate) fn add_term(&mut self, new_term: u64) {
        self.sum += new_term;
        self.num_terms += 1;
    }

    pub fn value(&self) -> f64 {
        if self.num_terms > 0 {
            (self.sum as f64) / (self.num_terms as f64)
        } else {
            0.0
        }
    }
}

impl Display for CumulativeMovingAverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::CumulativeMovingAverage;

    #[test]
    fn empty_average_is_zero() {
        assert_eq!(CumulativeMovingAverage::default().value(), 0.0);
    }

    #[test]
    fn average_of_terms() {
        let mut average = CumulativeMovingAverage::default();
        average.add_term(2);
        average.add_term(3);
        average.add_term(7);
        assert_eq!(average.value(), 4.0);
    }
}
