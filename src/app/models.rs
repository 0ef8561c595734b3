//! Data models for customer extract processing
//!
//! This module contains the record types that flow through the pipeline:
//! the positional [`RawRecord`] produced by the parser and the immutable
//! [`EnrichedRecord`] handed to the router and persister.

// =============================================================================
// Raw Record Structure
// =============================================================================

/// One data line of the customer extract
///
/// Every field is kept as the untyped text found in the extract. Field order
/// matches the positional layout of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number in the source file (the header is line 1)
    pub line_number: u64,

    /// Single character tag; `D` marks a detail record
    pub record_type: String,

    pub customer_name: String,
    pub customer_id: String,

    /// Account open date, DDMMYYYY
    pub open_date: String,

    /// Last consultation date, DDMMYYYY, may be empty
    pub last_consulted_date: String,

    pub vaccination_id: String,
    pub dr_name: String,
    pub state: String,
    pub country: String,

    /// Date of birth, DDMMYYYY
    pub dob: String,

    /// Single character active flag
    pub is_active: String,
}

impl RawRecord {
    /// Build a record from the eleven positional fields of a data line
    ///
    /// Returns `None` when the field count is not exactly eleven.
    pub fn from_fields<'a, I>(line_number: u64, fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        let [
            record_type,
            customer_name,
            customer_id,
            open_date,
            last_consulted_date,
            vaccination_id,
            dr_name,
            state,
            country,
            dob,
            is_active,
        ] = fields.as_slice()
        else {
            return None;
        };

        Some(Self {
            line_number,
            record_type: record_type.to_string(),
            customer_name: customer_name.to_string(),
            customer_id: customer_id.to_string(),
            open_date: open_date.to_string(),
            last_consulted_date: last_consulted_date.to_string(),
            vaccination_id: vaccination_id.to_string(),
            dr_name: dr_name.to_string(),
            state: state.to_string(),
            country: country.to_string(),
            dob: dob.to_string(),
            is_active: is_active.to_string(),
        })
    }

    /// Look up a field value by its extract column name
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "record_type" => &self.record_type,
            "customer_name" => &self.customer_name,
            "customer_id" => &self.customer_id,
            "open_date" => &self.open_date,
            "last_consulted_date" => &self.last_consulted_date,
            "vaccination_id" => &self.vaccination_id,
            "dr_name" => &self.dr_name,
            "state" => &self.state,
            "country" => &self.country,
            "dob" => &self.dob,
            "is_active" => &self.is_active,
            _ => return None,
        };
        Some(value.as_str())
    }
}

// =============================================================================
// Enriched Record Structure
// =============================================================================

/// A validated detail record with its derived attributes
///
/// Built once from a [`RawRecord`] (minus the record type) and never mutated.
/// Derived values are `None` when their source date did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    /// Source line, kept for diagnostics only; not persisted
    pub line_number: u64,

    pub customer_name: String,
    pub customer_id: String,
    pub open_date: String,
    pub last_consulted_date: String,
    pub vaccination_id: String,
    pub dr_name: String,
    pub state: String,
    pub country: String,
    pub dob: String,
    pub is_active: String,

    /// Whole years between `dob` and the run's reference date
    pub age: Option<i32>,

    /// Days between `last_consulted_date` and the run's reference date.
    /// Negative for future dates.
    pub days_since_last_consulted: Option<i64>,
}

impl EnrichedRecord {
    /// Consume a raw record and attach the derived attributes
    pub fn from_raw(raw: RawRecord, age: Option<i32>, days_since_last_consulted: Option<i64>) -> Self {
        Self {
            line_number: raw.line_number,
            customer_name: raw.customer_name,
            customer_id: raw.customer_id,
            open_date: raw.open_date,
            last_consulted_date: raw.last_consulted_date,
            vaccination_id: raw.vaccination_id,
            dr_name: raw.dr_name,
            state: raw.state,
            country: raw.country,
            dob: raw.dob,
            is_active: raw.is_active,
            age,
            days_since_last_consulted,
        }
    }

    /// Country code used for routing, with surrounding whitespace removed
    pub fn country_code(&self) -> &str {
        self.country.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> Vec<&'static str> {
        vec![
            "D", "Alex", "123457", "20101012", "13012012", "MVD", "Paul", "SA", "USA",
            "06031987", "A",
        ]
    }

    #[test]
    fn test_from_fields_maps_positions() {
        let record = RawRecord::from_fields(2, sample_fields()).unwrap();

        assert_eq!(record.line_number, 2);
        assert_eq!(record.record_type, "D");
        assert_eq!(record.customer_name, "Alex");
        assert_eq!(record.customer_id, "123457");
        assert_eq!(record.open_date, "20101012");
        assert_eq!(record.last_consulted_date, "13012012");
        assert_eq!(record.vaccination_id, "MVD");
        assert_eq!(record.dr_name, "Paul");
        assert_eq!(record.state, "SA");
        assert_eq!(record.country, "USA");
        assert_eq!(record.dob, "06031987");
        assert_eq!(record.is_active, "A");
    }

    #[test]
    fn test_from_fields_rejects_wrong_count() {
        let mut fields = sample_fields();
        fields.pop();
        assert!(RawRecord::from_fields(3, fields.clone()).is_none());

        fields.push("A");
        fields.push("extra");
        assert!(RawRecord::from_fields(3, fields).is_none());
    }

    #[test]
    fn test_field_lookup_by_name() {
        let record = RawRecord::from_fields(2, sample_fields()).unwrap();
        assert_eq!(record.field("customer_id"), Some("123457"));
        assert_eq!(record.field("dob"), Some("06031987"));
        assert_eq!(record.field("unknown"), None);
    }

    #[test]
    fn test_enriched_from_raw_passes_fields_through() {
        let raw = RawRecord::from_fields(5, sample_fields()).unwrap();
        let enriched = EnrichedRecord::from_raw(raw.clone(), Some(37), Some(-4));

        assert_eq!(enriched.line_number, raw.line_number);
        assert_eq!(enriched.customer_name, raw.customer_name);
        assert_eq!(enriched.country, raw.country);
        assert_eq!(enriched.is_active, raw.is_active);
        assert_eq!(enriched.age, Some(37));
        assert_eq!(enriched.days_since_last_consulted, Some(-4));
    }

    #[test]
    fn test_country_code_is_trimmed() {
        let mut fields = sample_fields();
        fields[8] = " US ";
        let raw = RawRecord::from_fields(2, fields).unwrap();
        let enriched = EnrichedRecord::from_raw(raw, None, None);
        assert_eq!(enriched.country_code(), "US");
        assert_eq!(enriched.country, " US ");
    }
}
