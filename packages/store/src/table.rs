//! # User table view model
//!
//! Column definitions, the job-title filter, single-column sorting and cell
//! formatting for the user tables. Nothing here touches the network; the UI
//! hands in the rows it already holds and renders what comes back.
//!
//! Sorting is stable: rows that compare equal keep their encounter order in both
//! directions. Missing values compare as the empty string and therefore come
//! first when ascending. The `Index` column sorts by original position.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::DateTime;

use crate::models::UserProfile;

/// Filter option meaning "no job-title filter".
pub const ALL_JOB_TITLES: &str = "all";
/// Cell text for a missing company.
pub const NO_COMPANY_TEXT: &str = "شرکتی وارد نشده";
/// Cell width, in characters, before text is truncated.
pub const CELL_TEXT_LIMIT: usize = 14;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    /// 1-based position in the unsorted list.
    Index,
    FullName,
    Username,
    Company,
    JobTitle,
    CreatedAt,
    /// "details" button column, not backed by data.
    Actions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDef {
    pub header_name: &'static str,
    pub key: ColumnKey,
    /// Extra CSS classes (responsive visibility).
    pub class_name: &'static str,
    pub sortable: bool,
}

impl ColumnDef {
    const fn new(header_name: &'static str, key: ColumnKey, class_name: &'static str) -> Self {
        Self {
            header_name,
            key,
            class_name,
            sortable: false,
        }
    }

    const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// Columns of the user list and search result tables.
pub fn user_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("ردیف", ColumnKey::Index, ""),
        ColumnDef::new("نام کامل", ColumnKey::FullName, ""),
        ColumnDef::new("نام کاربری", ColumnKey::Username, "hidden sm:table-cell"),
        ColumnDef::new("شرکت", ColumnKey::Company, "hidden md:table-cell"),
        ColumnDef::new("عنوان شغلی", ColumnKey::JobTitle, "hidden lg:table-cell"),
        ColumnDef::new("تاریخ ثبت نام", ColumnKey::CreatedAt, "hidden xl:table-cell").sortable(),
        ColumnDef::new("عملیات", ColumnKey::Actions, ""),
    ]
}

/// [`user_columns`] with the index column sortable as well.
pub fn user_list_columns() -> Vec<ColumnDef> {
    let mut columns = user_columns();
    if let Some(index) = columns.iter_mut().find(|c| c.key == ColumnKey::Index) {
        index.sortable = true;
    }
    columns
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header indicator.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<ColumnKey>,
    pub direction: SortDirection,
}

impl SortState {
    /// Header click: a new column sorts ascending, the same column flips direction.
    pub fn toggle(&mut self, key: ColumnKey) {
        if self.column == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(key);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Direction shown for `key`, if it is the sorted column.
    pub fn direction_for(&self, key: ColumnKey) -> Option<SortDirection> {
        (self.column == Some(key)).then_some(self.direction)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum JobTitleFilter {
    #[default]
    All,
    Exact(String),
}

impl JobTitleFilter {
    /// Parse a `<select>` option value.
    pub fn from_option(value: &str) -> Self {
        if value == ALL_JOB_TITLES {
            JobTitleFilter::All
        } else {
            JobTitleFilter::Exact(value.to_string())
        }
    }

    pub fn option_value(&self) -> &str {
        match self {
            JobTitleFilter::All => ALL_JOB_TITLES,
            JobTitleFilter::Exact(title) => title,
        }
    }

    fn matches(&self, user: &UserProfile) -> bool {
        match self {
            JobTitleFilter::All => true,
            JobTitleFilter::Exact(title) => user.job_title == *title,
        }
    }
}

/// `"all"` followed by the distinct non-empty job titles, sorted.
pub fn job_title_options(users: &[UserProfile]) -> Vec<String> {
    let titles: BTreeSet<&str> = users
        .iter()
        .map(|u| u.job_title.as_str())
        .filter(|t| !t.is_empty())
        .collect();

    std::iter::once(ALL_JOB_TITLES.to_string())
        .chain(titles.into_iter().map(str::to_string))
        .collect()
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Position(usize),
    Time(Option<i64>),
    Text(&'a str),
}

fn sort_value<'a>(key: ColumnKey, position: usize, user: &'a UserProfile) -> SortValue<'a> {
    let text = |value: &'a Option<String>| SortValue::Text(value.as_deref().unwrap_or(""));
    match key {
        ColumnKey::Index => SortValue::Position(position),
        ColumnKey::CreatedAt => SortValue::Time(timestamp_millis(&user.created_at)),
        ColumnKey::FullName => SortValue::Text(&user.full_name),
        ColumnKey::Username => SortValue::Text(&user.username),
        ColumnKey::JobTitle => SortValue::Text(&user.job_title),
        ColumnKey::Company => text(&user.company),
        ColumnKey::Actions => SortValue::Text(""),
    }
}

fn timestamp_millis(raw: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

/// Filter and sort `users`, keeping each row's original position.
pub fn arrange<'a>(
    users: &'a [UserProfile],
    filter: &JobTitleFilter,
    sort: &SortState,
) -> Vec<(usize, &'a UserProfile)> {
    let mut rows: Vec<(usize, &UserProfile)> = users
        .iter()
        .enumerate()
        .filter(|(_, user)| filter.matches(user))
        .collect();

    if let Some(key) = sort.column {
        rows.sort_by(|(pa, a), (pb, b)| {
            let ordering: Ordering = sort_value(key, *pa, a).cmp(&sort_value(key, *pb, b));
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    rows
}

/// Text shown in the cell of `key` for the row at `position`.
pub fn cell_text(key: ColumnKey, position: usize, user: &UserProfile) -> String {
    match key {
        ColumnKey::Index => (position + 1).to_string(),
        ColumnKey::FullName => truncate(&user.full_name, CELL_TEXT_LIMIT),
        ColumnKey::Username => user.username.clone(),
        ColumnKey::Company => match user.company.as_deref() {
            Some(company) if !company.is_empty() => truncate(company, CELL_TEXT_LIMIT),
            _ => NO_COMPANY_TEXT.to_string(),
        },
        ColumnKey::JobTitle => truncate(&user.job_title, CELL_TEXT_LIMIT),
        ColumnKey::CreatedAt => format_date(&user.created_at),
        ColumnKey::Actions => String::new(),
    }
}

/// Cut `text` to `max` characters, appending `...` when something was cut.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// `YYYY/MM/DD` for an RFC 3339 timestamp; unparsable input is returned as-is.
pub fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y/%m/%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Date and time for the detail view; unparsable input is returned as-is.
pub fn format_date_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y/%m/%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
