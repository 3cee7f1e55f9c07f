//! SyncAction - the kinds of work the engine performs per item

/// Action taken (or attempted) for a single directory or file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncAction {
    /// Create a missing destination directory
    CreateDirectory,

    /// Delete a destination file with no source counterpart
    DeleteFile,

    /// Copy a source file with no destination counterpart
    AddFile,

    /// Overwrite a destination file whose size differs
    UpdateFile,

    /// Leave an equally sized destination file alone
    SkipFile,

    /// Descend into a source subdirectory
    SyncDirectory,
}

impl SyncAction {
    /// Short label used in progress output and logs
    pub fn action_name(&self) -> &'static str {
        match self {
            SyncAction::CreateDirectory => "Mkdir",
            SyncAction::DeleteFile => "Delete",
            SyncAction::AddFile => "Add",
            SyncAction::UpdateFile => "Update",
            SyncAction::SkipFile => "Skip",
            SyncAction::SyncDirectory => "Sync",
        }
    }

    /// Whether this action writes file content to the destination
    pub fn is_transfer(&self) -> bool {
        matches!(self, SyncAction::AddFile | SyncAction::UpdateFile)
    }
}
