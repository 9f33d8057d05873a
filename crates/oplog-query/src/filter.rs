/// Field name that also drives job-label selection
pub const ACCELERATOR_FIELD: &str = "accelerator";

/// Accumulated field filters, keyed by field name.
///
/// Field order is first-occurrence order and per-field value order is
/// insertion order, so the composed query is deterministic. Values for one
/// field are OR-ed (alternation), values across fields are AND-ed. Identical
/// values are not deduplicated; a repeated value just joins the alternation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    fields: Vec<(String, Vec<String>)>,
    accelerators: Vec<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to the ordered list for `field`. Accelerator values
    /// additionally feed the job-label selection list.
    pub fn add(&mut self, field: &str, value: &str) {
        if field == ACCELERATOR_FIELD {
            self.accelerators.push(value.to_string());
        }
        match self.fields.iter().position(|(name, _)| name == field) {
            Some(index) => self.fields[index].1.push(value.to_string()),
            None => self
                .fields
                .push((field.to_string(), vec![value.to_string()])),
        }
    }

    /// Append every value in `values` for `field`, preserving order.
    pub fn add_all<I, S>(&mut self, field: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.add(field, value.as_ref());
        }
    }

    /// Field→values mapping in accumulation order.
    pub fn fields(&self) -> &[(String, Vec<String>)] {
        &self.fields
    }

    /// Accelerator values requested for job-label selection.
    pub fn accelerators(&self) -> &[String] {
        &self.accelerators
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_for_one_field_accumulate_in_order() {
        let mut filters = FilterSet::new();
        filters.add("facility", "CRYO");
        filters.add("origin", "MCC");
        filters.add("facility", "rf");

        assert_eq!(
            filters.fields(),
            &[
                (
                    "facility".to_string(),
                    vec!["CRYO".to_string(), "rf".to_string()]
                ),
                ("origin".to_string(), vec!["MCC".to_string()]),
            ]
        );
    }

    #[test]
    fn accelerator_values_feed_the_selection_list() {
        let mut filters = FilterSet::new();
        filters.add(ACCELERATOR_FIELD, "LCLS");
        filters.add("user", "jdoe");
        filters.add(ACCELERATOR_FIELD, "DEV");

        assert_eq!(filters.accelerators(), &["LCLS", "DEV"]);
    }

    #[test]
    fn duplicate_values_are_kept() {
        let mut filters = FilterSet::new();
        filters.add("facility", "CRYO");
        filters.add("facility", "CRYO");

        assert_eq!(filters.fields()[0].1, vec!["CRYO", "CRYO"]);
    }
}
