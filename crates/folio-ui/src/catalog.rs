//! Certificate catalog: identifier to display metadata.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::{FolioError, FolioResult};

const BUILTIN_CATALOG: &str = include_str!("../data/certificates.toml");

/// Title shown when the requested certificate is not in the catalog.
pub const GENERIC_TITLE: &str = "Certificate";

/// One certificate the page can display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateEntry {
    pub id: SmolStr,
    pub title: String,
    /// Image location, relative to the page.
    pub image_path: String,
    /// Suggested download name without extension.
    pub download_name: String,
}

impl CertificateEntry {
    /// File name offered by the download link. The extension follows the
    /// image path and defaults to `jpg`.
    pub fn download_file_name(&self) -> String {
        let file = self
            .image_path
            .rsplit_once('/')
            .map_or(self.image_path.as_str(), |(_, file)| file);
        let extension = match file.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext,
            _ => "jpg",
        };
        format!("{}.{extension}", self.download_name)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    certificate: Vec<CertificateEntry>,
}

/// Immutable certificate lookup table, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: IndexMap<SmolStr, CertificateEntry>,
}

impl Catalog {
    /// The catalog embedded in the crate (`data/certificates.toml`).
    pub fn builtin() -> FolioResult<Self> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    /// Parse a catalog from `[[certificate]]` tables.
    pub fn from_toml(contents: &str) -> FolioResult<Self> {
        let file: CatalogFile = toml::from_str(contents).map_err(|source| FolioError::Toml {
            what: "certificate catalog",
            source,
        })?;
        Self::from_entries(file.certificate)
    }

    /// Parse a catalog from `{"certificate": [...]}`.
    pub fn from_json(contents: &str) -> FolioResult<Self> {
        let file: CatalogFile =
            serde_json::from_str(contents).map_err(|source| FolioError::Json {
                what: "certificate catalog",
                source,
            })?;
        Self::from_entries(file.certificate)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = CertificateEntry>) -> FolioResult<Self> {
        let mut map = IndexMap::new();
        for entry in entries {
            validate_entry(&entry)?;
            if map.contains_key(&entry.id) {
                return Err(FolioError::DuplicateCertificate(entry.id));
            }
            map.insert(entry.id.clone(), entry);
        }
        Ok(Self { entries: map })
    }

    pub fn get(&self, id: &str) -> Option<&CertificateEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CertificateEntry> {
        self.entries.values()
    }
}

fn validate_entry(entry: &CertificateEntry) -> FolioResult<()> {
    let empty = |field: &'static str| FolioError::EmptyField {
        id: entry.id.clone(),
        field,
    };
    if entry.id.trim().is_empty() {
        return Err(empty("id"));
    }
    if entry.title.trim().is_empty() {
        return Err(empty("title"));
    }
    if entry.image_path.trim().is_empty() {
        return Err(empty("image_path"));
    }
    if entry.download_name.trim().is_empty() {
        return Err(empty("download_name"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, image_path: &str) -> CertificateEntry {
        CertificateEntry {
            id: id.into(),
            title: format!("{id} title"),
            image_path: image_path.to_string(),
            download_name: "Download".to_string(),
        }
    }

    #[test]
    fn builtin_catalog_has_reference_entries_in_order() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let ids: Vec<&str> = catalog.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "frontend-certificate",
                "java-certificate",
                "ai-certificate",
                "css-certificate",
                "html-certificate",
                "network-certificate",
            ]
        );
        let html = catalog.get("html-certificate").expect("html entry");
        assert_eq!(html.title, "HTML Essentials");
        assert_eq!(html.image_path, "certificates/html-certificate.jpg");
        assert_eq!(html.download_file_name(), "HTML-Certificate.jpg");
    }

    #[test]
    fn download_extension_follows_image_path() {
        assert_eq!(entry("a", "img/a.png").download_file_name(), "Download.png");
        assert_eq!(entry("a", "img.d/a").download_file_name(), "Download.jpg");
        assert_eq!(entry("a", "img/.hidden").download_file_name(), "Download.jpg");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::from_entries([entry("a", "a.jpg"), entry("a", "b.jpg")]).unwrap_err();
        assert!(matches!(err, FolioError::DuplicateCertificate(id) if id == "a"));
    }

    #[test]
    fn empty_fields_are_rejected() {
        let err = Catalog::from_entries([entry("a", "  ")]).unwrap_err();
        assert!(matches!(
            err,
            FolioError::EmptyField {
                field: "image_path",
                ..
            }
        ));
    }

    #[test]
    fn json_catalog_matches_toml_shape() {
        let catalog = Catalog::from_json(
            r#"{"certificate":[{"id":"x","title":"X","image_path":"x.jpg","download_name":"X"}]}"#,
        )
        .expect("json catalog");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("missing").is_none());
    }
}
