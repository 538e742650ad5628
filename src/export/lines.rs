use crate::error::ExportError;
use crate::graph::{JsonLineSource, ModelSource};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Dumps both views of every line so the model can be reopened with
/// [`JsonLineSource`] and no STEP parsing.
pub fn export_lines<S, P>(source: &S, path: P) -> Result<(), ExportError>
where
    S: ModelSource + ?Sized,
    P: AsRef<Path>,
{
    let path_ref = path.as_ref();
    let dump = JsonLineSource::capture(source)?;
    let json = serde_json::to_string(&dump.to_json())?;

    let mut file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    file.write_all(json.as_bytes())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;

    Ok(())
}
