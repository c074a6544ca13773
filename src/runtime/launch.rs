use std::path::PathBuf;

/// What the command line asked for. Paths are made absolute against the
/// working directory at launch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LaunchArgs {
    /// First directory argument; the picker opens there.
    pub picker_root: Option<PathBuf>,
    /// File arguments, queued in order.
    pub files: Vec<PathBuf>,
}

impl LaunchArgs {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut launch = Self::default();
        for arg in args {
            let path = absolute(PathBuf::from(arg));
            if path.is_dir() {
                if launch.picker_root.is_none() {
                    launch.picker_root = Some(path);
                }
            } else {
                launch.files.push(path);
            }
        }
        launch
    }
}

/// `path` joined onto the current directory when relative; unchanged if
/// that cannot be resolved.
pub(super) fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}
