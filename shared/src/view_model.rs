//! Display rows derived from backend records.

use crate::date::{self, ScheduleStatus};
use crate::{CaseCategory, CaseRecord, FileEntry, FileListing, FolderEntry, Id};
use chrono::NaiveDate;

// =========================================================
// Cases
// =========================================================

/// One row of the case list.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRow {
    pub id: Id,
    pub title: String,
    pub date_label: String,
    pub status: String,
}

impl From<&CaseRecord> for CaseRow {
    fn from(record: &CaseRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            date_label: date::format_case_date(&record.date),
            status: record.status_label().to_string(),
        }
    }
}

/// One row of the hearing schedule board.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub index: usize,
    pub id: Id,
    pub title: String,
    pub date_label: String,
    pub category: String,
    pub status: ScheduleStatus,
}

impl ScheduleRow {
    pub fn is_today(&self) -> bool {
        self.status == ScheduleStatus::Today
    }
}

/// Sorts by hearing date and numbers the rows from 1.
pub fn schedule_rows(mut cases: Vec<CaseRecord>, today: NaiveDate) -> Vec<ScheduleRow> {
    date::sort_by_date(&mut cases, |c| c.date.as_str());
    cases
        .iter()
        .enumerate()
        .map(|(i, case)| ScheduleRow {
            index: i + 1,
            id: case.id.clone(),
            title: case.title.clone(),
            date_label: match date::parse_case_date(&case.date) {
                Some(day) => date::format_with_weekday(day),
                None => case.date.clone(),
            },
            category: category_label(case.category.as_deref()),
            status: date::schedule_status(&case.date, today),
        })
        .collect()
}

/// Title of a raw `type` value; unknown values are shown verbatim.
pub fn category_label(raw: Option<&str>) -> String {
    match raw {
        Some(slug) => CaseCategory::from_slug(slug)
            .map(|c| c.title().to_string())
            .unwrap_or_else(|| slug.to_string()),
        None => "-".to_string(),
    }
}

// =========================================================
// Files
// =========================================================

/// How a file is opened from the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Pdf,
    Word,
    Other,
}

impl FileKind {
    pub fn from_mime(mime: Option<&str>) -> Self {
        match mime.unwrap_or_default() {
            m if m.starts_with("image/") => FileKind::Image,
            "application/pdf" => FileKind::Pdf,
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                FileKind::Word
            }
            _ => FileKind::Other,
        }
    }

    /// Documents open in an external viewer tab.
    pub fn uses_viewer(&self) -> bool {
        matches!(self, FileKind::Pdf | FileKind::Word)
    }
}

pub fn viewer_url(file_url: &str) -> String {
    format!(
        "https://docs.google.com/viewer?url={}&embedded=false",
        urlencoding::encode(file_url)
    )
}

/// `512 B`, `1.5 KB`, `2.0 MB`
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else if b < KB * KB * KB {
        format!("{:.1} MB", b / (KB * KB))
    } else {
        format!("{:.1} GB", b / (KB * KB * KB))
    }
}

/// A folder or file in the current directory.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserItem {
    Folder(FolderEntry),
    File(FileEntry),
}

impl BrowserItem {
    pub fn name(&self) -> &str {
        match self {
            BrowserItem::Folder(f) => &f.name,
            BrowserItem::File(f) => &f.name,
        }
    }

    /// Unique across both kinds.
    pub fn key(&self) -> String {
        match self {
            BrowserItem::Folder(f) => format!("folder-{}", f.id),
            BrowserItem::File(f) => format!("file-{}", f.id),
        }
    }
}

/// Folders first, then files; case-insensitive name filter.
pub fn browser_items(listing: &FileListing, query: &str) -> Vec<BrowserItem> {
    let needle = query.trim().to_lowercase();
    let folders = listing.folders.iter().cloned().map(BrowserItem::Folder);
    let files = listing.files.iter().cloned().map(BrowserItem::File);
    folders
        .chain(files)
        .filter(|item| needle.is_empty() || item.name().to_lowercase().contains(&needle))
        .collect()
}

/// Backend `path` parameter for a folder stack.
pub fn folder_path(stack: &[String]) -> String {
    stack.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: i64, title: &str, date: &str, category: &str) -> CaseRecord {
        CaseRecord {
            id: Id::from(id),
            title: title.to_string(),
            date: date.to_string(),
            description: None,
            parties: None,
            witnesses: None,
            prosecutor: None,
            category: Some(category.to_string()),
            status: None,
        }
    }

    #[test]
    fn case_row_localises_and_defaults_status() {
        let row = CaseRow::from(&case(1, "A", "2024-01-01", "penyidikan"));
        assert_eq!(row.title, "A");
        assert_eq!(row.date_label, "1 Januari 2024");
        assert_eq!(row.status, "Menunggu");
    }

    #[test]
    fn schedule_is_sorted_and_numbered() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let rows = schedule_rows(
            vec![
                case(1, "Later", "2024-01-05", "penuntutan"),
                case(2, "Past", "2024-01-01", "eksekusi"),
                case(3, "Now", "2024-01-02", "lainnya"),
            ],
            today,
        );
        let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Past", "Now", "Later"]);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].status, ScheduleStatus::Finished);
        assert!(rows[1].is_today());
        assert_eq!(rows[1].category, "lainnya");
        assert_eq!(rows[2].category, "Penuntutan");
        assert_eq!(rows[1].date_label, "Selasa, 2 Januari 2024");
    }

    #[test]
    fn file_kinds() {
        assert_eq!(FileKind::from_mime(Some("image/png")), FileKind::Image);
        assert_eq!(FileKind::from_mime(Some("application/pdf")), FileKind::Pdf);
        assert_eq!(FileKind::from_mime(Some("application/msword")), FileKind::Word);
        assert_eq!(FileKind::from_mime(None), FileKind::Other);
        assert!(FileKind::Word.uses_viewer());
        assert!(!FileKind::Image.uses_viewer());
    }

    #[test]
    fn viewer_url_encodes_target() {
        assert_eq!(
            viewer_url("https://cdn.example.com/a b.pdf?x=1"),
            "https://docs.google.com/viewer?url=https%3A%2F%2Fcdn.example.com%2Fa%20b.pdf%3Fx%3D1&embedded=false"
        );
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.0 MB");
    }

    #[test]
    fn browser_lists_folders_first_and_filters() {
        let listing = FileListing {
            files: vec![FileEntry {
                id: Id::from(1),
                name: "Surat Dakwaan.pdf".to_string(),
                url: None,
                file_type: Some("application/pdf".to_string()),
                size: None,
                created_at: None,
            }],
            folders: vec![FolderEntry {
                id: Id::from(1),
                name: "Dakwaan".to_string(),
                created_at: None,
            }],
        };
        let all = browser_items(&listing, "");
        assert!(matches!(all[0], BrowserItem::Folder(_)));
        assert_ne!(all[0].key(), all[1].key());

        let hits = browser_items(&listing, "SURAT");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Surat Dakwaan.pdf");

        assert_eq!(folder_path(&["BAP".to_string(), "2024".to_string()]), "BAP/2024");
    }
}
