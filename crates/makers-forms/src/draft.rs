//! In-memory draft state.

use makers_core::models::{AssetRef, PersistedDraft, ProductFields};

/// Working copy of a product form.
///
/// Assets may be pending local files; only their committed URLs reach the session store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub fields: ProductFields,
    pub icon: Option<AssetRef>,
    pub screenshots: Vec<AssetRef>,
}

impl Draft {
    pub fn from_persisted(persisted: PersistedDraft) -> Self {
        Self {
            fields: persisted.fields,
            icon: persisted
                .icon_url
                .filter(|url| !url.trim().is_empty())
                .map(AssetRef::uploaded),
            screenshots: persisted
                .screenshot_urls
                .into_iter()
                .filter(|url| !url.trim().is_empty())
                .map(AssetRef::uploaded)
                .collect(),
        }
    }

    /// Snapshot for the session store. Pending files are left out.
    pub fn to_persisted(&self) -> PersistedDraft {
        PersistedDraft {
            fields: self.fields.clone(),
            icon_url: self.icon_url().map(str::to_string),
            screenshot_urls: self.screenshot_urls(),
        }
    }

    pub fn icon_url(&self) -> Option<&str> {
        self.icon.as_ref().and_then(AssetRef::url)
    }

    /// Committed screenshot URLs in display order
    pub fn screenshot_urls(&self) -> Vec<String> {
        self.screenshots
            .iter()
            .filter_map(AssetRef::url)
            .map(str::to_string)
            .collect()
    }

    pub fn uploaded_screenshot_count(&self) -> usize {
        self.screenshots.iter().filter(|s| !s.is_pending()).count()
    }

    pub fn pending_count(&self) -> usize {
        let icon = self.icon.as_ref().map_or(0, |i| usize::from(i.is_pending()));
        icon + self.screenshots.iter().filter(|s| s.is_pending()).count()
    }

    pub fn has_pending_assets(&self) -> bool {
        self.pending_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use makers_core::models::LocalFile;

    fn pending(name: &str) -> AssetRef {
        AssetRef::Pending(LocalFile::new(name, "image/png", b"png".to_vec()))
    }

    #[test]
    fn pending_assets_are_not_persisted() {
        let draft = Draft {
            fields: ProductFields::default(),
            icon: Some(pending("icon.png")),
            screenshots: vec![
                AssetRef::uploaded("https://cdn.example.com/a.png"),
                pending("b.png"),
                AssetRef::uploaded("https://cdn.example.com/c.png"),
            ],
        };

        let persisted = draft.to_persisted();
        assert_eq!(persisted.icon_url, None);
        assert_eq!(
            persisted.screenshot_urls,
            vec![
                "https://cdn.example.com/a.png".to_string(),
                "https://cdn.example.com/c.png".to_string()
            ]
        );
        assert_eq!(draft.pending_count(), 2);
        assert_eq!(draft.uploaded_screenshot_count(), 2);
    }

    #[test]
    fn restore_skips_blank_urls() {
        let persisted = PersistedDraft {
            fields: ProductFields::default(),
            icon_url: Some("  ".to_string()),
            screenshot_urls: vec!["".to_string(), "https://cdn.example.com/a.png".to_string()],
        };

        let draft = Draft::from_persisted(persisted);
        assert!(draft.icon.is_none());
        assert_eq!(draft.screenshots.len(), 1);
        assert!(!draft.has_pending_assets());
    }
}
