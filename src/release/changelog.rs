use chrono::NaiveDate;
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

/// Version section header: `### 1.2.3 / 2020-01-01`
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^### (\S+) / ([0-9]{4}-[0-9]{2}-[0-9]{2})\n")
        .expect("changelog header regex is valid")
});

/// Any header at the same level ends a section
static SECTION_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^###\s").expect("changelog section regex is valid"));

/// One version's section of a `CHANGELOG.md`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// Release date from the header, if it is a real calendar date
    pub date: Option<NaiveDate>,
    /// Section body with surrounding whitespace trimmed
    pub notes: String,
}

/// Find the section for `version`.
///
/// The body runs from the line after the header to the next `### ` header or
/// the end of the file.
pub fn find_changelog_entry(changelog: &str, version: &Version) -> Option<ChangelogEntry> {
    let version = version.to_string();
    let caps = HEADER_RE
        .captures_iter(changelog)
        .find(|caps| caps[1] == version)?;

    let body_start = caps.get(0)?.end();
    let rest = &changelog[body_start..];
    let body = match SECTION_END_RE.find(rest) {
        Some(end) => &rest[..end.start()],
        None => rest,
    };

    Some(ChangelogEntry {
        date: NaiveDate::parse_from_str(&caps[2], "%Y-%m-%d").ok(),
        notes: body.trim().to_string(),
    })
}

/// Release notes for `version`, or an empty string when the changelog has no
/// section for it.
pub fn find_release_notes(changelog: &str, version: &Version) -> String {
    match find_changelog_entry(changelog, version) {
        Some(entry) => {
            log::debug!("changelog section for {} dated {:?}", version, entry.date);
            entry.notes
        }
        None => {
            log::debug!("no changelog section for {}", version);
            String::new()
        }
    }
}
