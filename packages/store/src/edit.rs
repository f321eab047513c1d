//! Edit form for a single user profile.
//!
//! A [`ProfileDraft`] holds the form's text values. On submit the draft is
//! checked for required fields, compared with the record it was opened from, and
//! only the changed fields are merged into a copy of that record, which becomes
//! the update request body.

use crate::models::UserProfile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FullName,
    Username,
    Email,
    JobTitle,
    Company,
    Department,
    Bio,
}

impl ProfileField {
    /// Form order.
    pub const ALL: [ProfileField; 7] = [
        ProfileField::FullName,
        ProfileField::Username,
        ProfileField::Email,
        ProfileField::JobTitle,
        ProfileField::Company,
        ProfileField::Department,
        ProfileField::Bio,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ProfileField::FullName => "full_name",
            ProfileField::Username => "username",
            ProfileField::Email => "email",
            ProfileField::JobTitle => "job_title",
            ProfileField::Company => "company",
            ProfileField::Department => "department",
            ProfileField::Bio => "bio",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::FullName => "نام و نام خانوادگی",
            ProfileField::Username => "نام کاربری",
            ProfileField::Email => "ایمیل",
            ProfileField::JobTitle => "عنوان شغلی",
            ProfileField::Company => "شرکت",
            ProfileField::Department => "دپارتمان",
            ProfileField::Bio => "بیوگرافی",
        }
    }

    /// HTML input type.
    pub fn input_type(self) -> &'static str {
        match self {
            ProfileField::Email => "email",
            _ => "text",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            ProfileField::FullName
                | ProfileField::Username
                | ProfileField::Email
                | ProfileField::JobTitle
        )
    }

    /// The lookup key is shown but cannot be edited.
    pub fn is_read_only(self) -> bool {
        self == ProfileField::Username
    }

    /// Message shown when a required field is left blank.
    pub fn required_message(self) -> Option<&'static str> {
        match self {
            ProfileField::FullName => Some("نام و نام خانوادگی اجباری است!"),
            ProfileField::Username => Some("نام کاربری اجباری است!"),
            ProfileField::Email => Some("ایمیل اجباری است!"),
            ProfileField::JobTitle => Some("عنوان شغلی اجباری است!"),
            _ => None,
        }
    }
}

/// Text values of the edit form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileDraft {
    full_name: String,
    username: String,
    email: String,
    job_title: String,
    company: String,
    department: String,
    bio: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ProfileDraft {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            full_name: profile.full_name.clone(),
            username: profile.username.clone(),
            email: profile.email.clone(),
            job_title: profile.job_title.clone(),
            company: profile.company.clone().unwrap_or_default(),
            department: profile.department.clone().unwrap_or_default(),
            bio: profile.bio.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FullName => &self.full_name,
            ProfileField::Username => &self.username,
            ProfileField::Email => &self.email,
            ProfileField::JobTitle => &self.job_title,
            ProfileField::Company => &self.company,
            ProfileField::Department => &self.department,
            ProfileField::Bio => &self.bio,
        }
    }

    /// Set a field. Read-only fields are left untouched.
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = match field {
            ProfileField::Username => return,
            ProfileField::FullName => &mut self.full_name,
            ProfileField::Email => &mut self.email,
            ProfileField::JobTitle => &mut self.job_title,
            ProfileField::Company => &mut self.company,
            ProfileField::Department => &mut self.department,
            ProfileField::Bio => &mut self.bio,
        };
        *slot = value.into();
    }

    /// Required fields that are blank, with their messages.
    pub fn missing_required(&self) -> Vec<(ProfileField, &'static str)> {
        ProfileField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .filter_map(|f| f.required_message().map(|msg| (f, msg)))
            .collect()
    }

    /// Fields whose value differs from `original`. Blank optional fields equal `null`.
    pub fn changed_fields(&self, original: &UserProfile) -> Vec<ProfileField> {
        let before = ProfileDraft::from_profile(original);
        ProfileField::ALL
            .into_iter()
            .filter(|f| {
                if f.is_required() {
                    self.get(*f) != before.get(*f)
                } else {
                    optional(self.get(*f)) != optional(before.get(*f))
                }
            })
            .collect()
    }

    /// `original` with the changed fields replaced.
    pub fn merge_into(&self, original: &UserProfile) -> UserProfile {
        let mut updated = original.clone();
        for field in self.changed_fields(original) {
            let value = self.get(field);
            match field {
                ProfileField::FullName => updated.full_name = value.to_string(),
                ProfileField::Username => updated.username = value.to_string(),
                ProfileField::Email => updated.email = value.to_string(),
                ProfileField::JobTitle => updated.job_title = value.to_string(),
                ProfileField::Company => updated.company = optional(value),
                ProfileField::Department => updated.department = optional(value),
                ProfileField::Bio => updated.bio = optional(value),
            }
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_profile;

    #[test]
    fn test_single_changed_field_merges_into_original() {
        let mut original = sample_profile("1", "Ali Rezaei", "Engineer");
        original.company = Some("Acme".into());
        original.last_sign_in_at = Some("2024-06-01T12:00:00Z".into());

        let mut draft = ProfileDraft::from_profile(&original);
        draft.set(ProfileField::JobTitle, "Staff Engineer");

        assert_eq!(draft.changed_fields(&original), [ProfileField::JobTitle]);

        let updated = draft.merge_into(&original);
        assert_eq!(updated.job_title, "Staff Engineer");
        assert_eq!(
            UserProfile {
                job_title: original.job_title.clone(),
                ..updated
            },
            original
        );
    }

    #[test]
    fn test_unchanged_draft_has_no_changes() {
        let original = sample_profile("1", "Ali", "Engineer");
        let draft = ProfileDraft::from_profile(&original);
        assert!(draft.changed_fields(&original).is_empty());
        assert_eq!(draft.merge_into(&original), original);
    }

    #[test]
    fn test_blank_optional_becomes_null() {
        let mut original = sample_profile("1", "Ali", "Engineer");
        original.bio = Some("old bio".into());

        let mut draft = ProfileDraft::from_profile(&original);
        draft.set(ProfileField::Bio, "   ");

        let updated = draft.merge_into(&original);
        assert_eq!(updated.bio, None);
    }

    #[test]
    fn test_username_is_read_only() {
        let original = sample_profile("1", "Ali", "Engineer");
        let mut draft = ProfileDraft::from_profile(&original);
        draft.set(ProfileField::Username, "someone_else");
        assert_eq!(draft.get(ProfileField::Username), original.username);
    }

    #[test]
    fn test_missing_required_fields() {
        let original = sample_profile("1", "Ali", "Engineer");
        let mut draft = ProfileDraft::from_profile(&original);
        draft.set(ProfileField::Email, "");
        draft.set(ProfileField::Company, "");

        assert_eq!(
            draft.missing_required(),
            [(ProfileField::Email, "ایمیل اجباری است!")]
        );
    }
}
