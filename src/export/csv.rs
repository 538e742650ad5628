use crate::error::ExportError;
use crate::model::TypeIndex;
use std::fs::File;
use std::path::Path;

/// Writes one row per entity type: name, line count and space-separated ids.
pub fn export_csv<P: AsRef<Path>>(type_index: &TypeIndex, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(["Type", "Count", "Ids"])?;

    for (type_name, ids) in type_index.iter() {
        let joined = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        writer.write_record([type_name, &ids.len().to_string(), &joined])?;
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}
