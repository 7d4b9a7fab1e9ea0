/// One row of the archive index: the storage key and the name shown in the
/// saved-résumé selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedResume {
    pub key: String,
    pub display_name: String,
}
