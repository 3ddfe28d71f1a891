use crate::model::document::{DocumentDto, DocumentVersionDto};

/// Top-level folders of the document library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFolder {
    Applications,
    Projects,
    Awards,
    Reports,
}

impl DocumentFolder {
    pub const ALL: [DocumentFolder; 4] = [
        DocumentFolder::Applications,
        DocumentFolder::Projects,
        DocumentFolder::Awards,
        DocumentFolder::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applications => "Applications",
            Self::Projects => "Projects",
            Self::Awards => "Awards",
            Self::Reports => "Reports",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Applications" => Some(Self::Applications),
            "Projects" => Some(Self::Projects),
            "Awards" => Some(Self::Awards),
            "Reports" => Some(Self::Reports),
            _ => None,
        }
    }
}

const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

/// Whether the filename carries an allowed upload extension.
pub fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Guesses a content type from the filename extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

pub fn version_to_dto(version: entity::document::DocumentVersion) -> DocumentVersionDto {
    DocumentVersionDto {
        id: version.id,
        version_number: version.version_number,
        file_name: version.file_name,
        file_type: version.file_type,
        file_size: version.file_size,
        uploaded_by: version.uploaded_by,
        uploaded_at: version.uploaded_at,
        notes: version.notes,
    }
}

/// Converts a document entity into its DTO form. Version metadata is
/// included; stored file content is not.
pub fn into_dto(model: entity::document::Model) -> DocumentDto {
    DocumentDto {
        id: model.id,
        name: model.name,
        folder: model.folder,
        current_version: model.current_version,
        versions: model.versions.0.into_iter().map(version_to_dto).collect(),
        created_by: model.created_by,
        tags: model.tags.0,
        created_at: model.created_at,
        last_modified: model.last_modified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_extensions() {
        assert!(has_allowed_extension("proposal.pdf"));
        assert!(has_allowed_extension("notes.TXT"));
        assert!(has_allowed_extension("report.docx"));
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(!has_allowed_extension("malware.exe"));
        assert!(!has_allowed_extension("archive.tar.gz"));
        assert!(!has_allowed_extension("noextension"));
    }

    #[test]
    fn content_type_ignores_extension_case() {
        assert_eq!(content_type_for("notes.TXT"), "text/plain");
        assert_eq!(content_type_for("proposal.Pdf"), "application/pdf");
        assert_eq!(content_type_for("unknown.bin"), "application/octet-stream");
    }

    #[test]
    fn parses_folder_names() {
        assert_eq!(
            DocumentFolder::parse("Awards"),
            Some(DocumentFolder::Awards)
        );
        assert_eq!(DocumentFolder::parse("awards"), None);
    }
}
