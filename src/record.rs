//! In-memory model of the generated version definition file.

use thiserror::Error;

/// Accessor definitions emitted into the generated file, one per provenance
/// field. The declaration order here is the order their definitions appear
/// in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    Version,
    BuildDateLocal,
    BuildDateUtc,
    GitRevision,
    GitCommitDate,
    GitStatus,
    GitLog,
    Sha1OfFiles,
}

impl Accessor {
    /// Every accessor, in output order.
    pub const ALL: [Accessor; 8] = [
        Accessor::Version,
        Accessor::BuildDateLocal,
        Accessor::BuildDateUtc,
        Accessor::GitRevision,
        Accessor::GitCommitDate,
        Accessor::GitStatus,
        Accessor::GitLog,
        Accessor::Sha1OfFiles,
    ];

    /// Suffix appended to `Loadgen` to form the accessor function name.
    pub fn name(self) -> &'static str {
        match self {
            Accessor::Version => "Version",
            Accessor::BuildDateLocal => "BuildDateLocal",
            Accessor::BuildDateUtc => "BuildDateUtc",
            Accessor::GitRevision => "GitRevision",
            Accessor::GitCommitDate => "GitCommitDate",
            Accessor::GitStatus => "GitStatus",
            Accessor::GitLog => "GitLog",
            Accessor::Sha1OfFiles => "Sha1OfFiles",
        }
    }
}

/// A C++ string literal carried by one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CppLiteral {
    /// Rendered as `"..."` with backslashes and double quotes escaped.
    Quoted(String),
    /// Rendered as `R"(...)"` with the payload embedded verbatim.
    Raw(String),
}

/// Error category for version record construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("duplicate accessor Loadgen{}", .0.name())]
    Duplicate(Accessor),

    #[error("missing accessor Loadgen{}", .0.name())]
    Missing(Accessor),

    #[error("expected accessor Loadgen{}, found Loadgen{}", .expected.name(), .found.name())]
    OutOfOrder { expected: Accessor, found: Accessor },
}

/// Ordered collection of accessor values for one generated file.
#[derive(Debug, Default)]
pub struct VersionRecord {
    fields: Vec<(Accessor, CppLiteral)>,
}

impl VersionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Each accessor may be pushed at most once.
    pub fn push(&mut self, accessor: Accessor, value: CppLiteral) -> Result<(), RecordError> {
        if self.fields.iter().any(|(existing, _)| *existing == accessor) {
            return Err(RecordError::Duplicate(accessor));
        }
        self.fields.push((accessor, value));
        Ok(())
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Accessor, &CppLiteral)> + '_ {
        self.fields.iter().map(|(accessor, value)| (*accessor, value))
    }

    /// Checks that all eight accessors are present, in output order.
    pub fn validate(&self) -> Result<(), RecordError> {
        for (index, expected) in Accessor::ALL.iter().enumerate() {
            match self.fields.get(index) {
                None => return Err(RecordError::Missing(*expected)),
                Some((found, _)) if found != expected => {
                    return Err(RecordError::OutOfOrder {
                        expected: *expected,
                        found: *found,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quoted(value: &str) -> CppLiteral {
        CppLiteral::Quoted(value.to_string())
    }

    #[test]
    fn push_rejects_duplicates() {
        let mut record = VersionRecord::new();
        record.push(Accessor::Version, quoted("1")).unwrap();
        let err = record.push(Accessor::Version, quoted("2")).unwrap_err();
        assert_eq!(err, RecordError::Duplicate(Accessor::Version));
    }

    #[test]
    fn iter_preserves_insertion_order() {
        let mut record = VersionRecord::new();
        record.push(Accessor::GitLog, quoted("log")).unwrap();
        record.push(Accessor::Version, quoted("v")).unwrap();
        let order: Vec<Accessor> = record.iter().map(|(accessor, _)| accessor).collect();
        assert_eq!(order, vec![Accessor::GitLog, Accessor::Version]);
    }

    #[test]
    fn validate_accepts_full_record_in_order() {
        let mut record = VersionRecord::new();
        for accessor in Accessor::ALL {
            record.push(accessor, quoted("x")).unwrap();
        }
        assert!(record.validate().is_ok());
    }

    #[test]
    fn validate_reports_first_missing_accessor() {
        let mut record = VersionRecord::new();
        record.push(Accessor::Version, quoted("v")).unwrap();
        let err = record.validate().unwrap_err();
        assert_eq!(err, RecordError::Missing(Accessor::BuildDateLocal));
    }

    #[test]
    fn validate_reports_out_of_order_fields() {
        let mut record = VersionRecord::new();
        record.push(Accessor::BuildDateLocal, quoted("t")).unwrap();
        record.push(Accessor::Version, quoted("v")).unwrap();
        let err = record.validate().unwrap_err();
        assert_eq!(
            err,
            RecordError::OutOfOrder {
                expected: Accessor::Version,
                found: Accessor::BuildDateLocal,
            }
        );
    }

    #[test]
    fn accessor_names_match_output_suffixes() {
        assert_eq!(Accessor::Sha1OfFiles.name(), "Sha1OfFiles");
        assert_eq!(Accessor::BuildDateUtc.name(), "BuildDateUtc");
        assert_eq!(Accessor::ALL.len(), 8);
    }
}
