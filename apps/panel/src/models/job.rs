use serde::{Deserialize, Serialize};

/// One work-history record as produced by the extraction service.
///
/// Every field is optional free text. Dates are kept verbatim; nothing here
/// validates their format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The six editable fields of a [`JobEntry`], in card order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobField {
    Company,
    Title,
    Location,
    StartDate,
    EndDate,
    Description,
}

impl JobField {
    pub const ALL: [JobField; 6] = [
        JobField::Company,
        JobField::Title,
        JobField::Location,
        JobField::StartDate,
        JobField::EndDate,
        JobField::Description,
    ];

    /// The tag carried by the rendered control; also the JSON field name.
    pub fn key(self) -> &'static str {
        match self {
            JobField::Company => "company",
            JobField::Title => "title",
            JobField::Location => "location",
            JobField::StartDate => "startDate",
            JobField::EndDate => "endDate",
            JobField::Description => "description",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            JobField::Company => "Company",
            JobField::Title => "Job Title",
            JobField::Location => "Location",
            JobField::StartDate => "Start Date",
            JobField::EndDate => "End Date",
            JobField::Description => "Description",
        }
    }

    /// Case-insensitive lookup by tag.
    pub fn from_key(key: &str) -> Option<Self> {
        JobField::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(key))
    }
}

impl JobEntry {
    /// Field value for display. Absent fields read as `""`.
    pub fn get(&self, field: JobField) -> &str {
        let value = match field {
            JobField::Company => &self.company,
            JobField::Title => &self.title,
            JobField::Location => &self.location,
            JobField::StartDate => &self.start_date,
            JobField::EndDate => &self.end_date,
            JobField::Description => &self.description,
        };
        value.as_deref().unwrap_or("")
    }

    pub fn set(&mut self, field: JobField, value: impl Into<String>) {
        let slot = match field {
            JobField::Company => &mut self.company,
            JobField::Title => &mut self.title,
            JobField::Location => &mut self.location,
            JobField::StartDate => &mut self.start_date,
            JobField::EndDate => &mut self.end_date,
            JobField::Description => &mut self.description,
        };
        *slot = Some(value.into());
    }

    /// Copy with every absent field replaced by an empty string, which is
    /// the shape an entry takes after a round trip through the editor.
    pub fn normalized(&self) -> JobEntry {
        let mut out = JobEntry::default();
        for field in JobField::ALL {
            out.set(field, self.get(field));
        }
        out
    }
}

/// Success body of the extraction service: `{"jobs": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParsedJobs {
    #[serde(default)]
    pub jobs: Option<Vec<JobEntry>>,
}

impl ParsedJobs {
    /// A missing or null `jobs` field means "nothing found", not an error.
    pub fn into_jobs(self) -> Vec<JobEntry> {
        self.jobs.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_camel_case_fields() {
        let entry: JobEntry = serde_json::from_str(
            r#"{"company":"Acme Corp","startDate":"2020","endDate":"2022"}"#,
        )
        .unwrap();
        assert_eq!(entry.company.as_deref(), Some("Acme Corp"));
        assert_eq!(entry.start_date.as_deref(), Some("2020"));
        assert_eq!(entry.end_date.as_deref(), Some("2022"));
        assert_eq!(entry.title, None);
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let entry: JobEntry = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert_eq!(entry.get(JobField::Title), "");
        assert_eq!(entry.get(JobField::Description), "");
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let entry = JobEntry {
            company: Some("Acme".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&entry).unwrap(), r#"{"company":"Acme"}"#);
    }

    #[test]
    fn test_normalized_fills_every_field() {
        let entry = JobEntry {
            title: Some("Engineer".to_string()),
            ..Default::default()
        };
        let n = entry.normalized();
        assert_eq!(n.title.as_deref(), Some("Engineer"));
        assert_eq!(n.company.as_deref(), Some(""));
        assert_eq!(n.description.as_deref(), Some(""));
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in JobField::ALL {
            assert_eq!(JobField::from_key(field.key()), Some(field));
        }
        assert_eq!(JobField::from_key("STARTDATE"), Some(JobField::StartDate));
        assert_eq!(JobField::from_key("salary"), None);
    }

    #[test]
    fn test_missing_jobs_is_empty_list() {
        let parsed: ParsedJobs = serde_json::from_str("{}").unwrap();
        assert!(parsed.into_jobs().is_empty());
        let parsed: ParsedJobs = serde_json::from_str(r#"{"jobs":null}"#).unwrap();
        assert!(parsed.into_jobs().is_empty());
    }
}
