//! Arrival predictions for one stop

use std::collections::BTreeSet;
use std::fmt::Write;

/// One expected arrival
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub route: String,
    pub minutes: u32,
}

/// Arrivals in the order the feed reported them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionSet {
    predictions: Vec<Prediction>,
}

impl PredictionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, route: impl Into<String>, minutes: u32) {
        self.predictions.push(Prediction {
            route: route.into(),
            minutes,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn all(&self) -> &[Prediction] {
        &self.predictions
    }

    /// Distinct routes, sorted
    pub fn routes(&self) -> Vec<&str> {
        self.predictions
            .iter()
            .map(|p| p.route.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Arrivals on one route, in feed order
    pub fn for_route<'a>(&'a self, route: &'a str) -> impl Iterator<Item = &'a Prediction> + 'a {
        self.predictions.iter().filter(move |p| p.route == route)
    }

    /// Every arrival on one line: `N~3m 14~5m`
    pub fn summary_line(&self) -> String {
        let mut line = String::new();
        for prediction in &self.predictions {
            if !line.is_empty() {
                line.push(' ');
            }
            let _ = write!(line, "{}~{}m", prediction.route, prediction.minutes);
        }
        line
    }

    /// Arrivals on one route: `N: 3m 8m`
    pub fn route_line(&self, route: &str) -> String {
        let mut line = format!("{route}:");
        for prediction in self.for_route(route) {
            let _ = write!(line, " {}m", prediction.minutes);
        }
        line
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for PredictionSet {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut set = PredictionSet::new();
        for (route, minutes) in iter {
            set.add(route, minutes);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PredictionSet {
        [("N", 3), ("14", 5), ("N", 8), ("10", 12)].into_iter().collect()
    }

    #[test]
    fn test_routes_sorted_and_unique() {
        assert_eq!(sample().routes(), vec!["10", "14", "N"]);
    }

    #[test]
    fn test_for_route_keeps_feed_order() {
        let set = sample();
        let minutes: Vec<u32> = set.for_route("N").map(|p| p.minutes).collect();
        assert_eq!(minutes, vec![3, 8]);
        assert_eq!(set.for_route("J").count(), 0);
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(sample().summary_line(), "N~3m 14~5m N~8m 10~12m");
        assert_eq!(PredictionSet::new().summary_line(), "");
    }

    #[test]
    fn test_route_line() {
        assert_eq!(sample().route_line("N"), "N: 3m 8m");
        assert_eq!(sample().route_line("10"), "10: 12m");
    }
}
