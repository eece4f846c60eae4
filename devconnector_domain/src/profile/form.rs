//! Raw profile input as submitted by the client, and its normalization
//! into a partial-update document.

use super::{ProfileUpdate, Social};
use crate::error::{DcError, DcResult};
use crate::user::UserId;

/// The profile form exactly as the client posts it.
///
/// Every field is optional at this point. Empty and whitespace-only strings
/// are treated the same as missing ones.
#[derive(serde::Deserialize, serde::Serialize, Default, Clone, Debug, Eq, PartialEq)]
#[serde(default)]
pub struct ProfileForm {
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl ProfileForm {
    /// Reject the form before anything touches storage.
    pub fn validate(&self) -> DcResult<()> {
        if split_skills(self.skills.as_deref()).is_none() {
            return Err(DcError::validation([("skills", "Skills are required")]));
        }

        Ok(())
    }

    /// Reshape the form into the document applied by the upsert.
    pub fn normalize(self, owner: UserId) -> ProfileUpdate {
        ProfileUpdate {
            owner,
            location: present(self.location),
            bio: present(self.bio),
            github_username: present(self.githubusername),
            skills: split_skills(self.skills.as_deref()),
            social: Social {
                linkedin: present(self.linkedin),
                instagram: present(self.instagram),
            },
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// `"a, b ,c"` becomes `["a", "b", "c"]`. Every entry is kept in order,
/// blank ones included. A blank raw value is no list at all.
fn split_skills(skills: Option<&str>) -> Option<Vec<String>> {
    let skills = skills.filter(|skills| !skills.trim().is_empty())?;

    Some(skills.split(',').map(|skill| skill.trim().to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::*;

    fn owner() -> UserId {
        UserId(uuid::Uuid::parse_str("20a626ba-c7d3-44c7-981a-e880f81c126f").unwrap())
    }

    fn form(skills: &str) -> ProfileForm {
        ProfileForm {
            skills: Some(skills.to_string()),
            ..ProfileForm::default()
        }
    }

    #[test]
    fn skills_should_be_split_and_trimmed() {
        let update = form("a, b ,c").normalize(owner());

        assert_eq!(
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
            update.skills
        );
    }

    #[test]
    fn blank_skill_entries_should_be_kept_in_place() {
        let update = form("HTML,,CSS,").normalize(owner());

        assert_eq!(
            Some(vec![
                "HTML".to_string(),
                "".to_string(),
                "CSS".to_string(),
                "".to_string()
            ]),
            update.skills
        );
    }

    #[test]
    fn blank_skills_should_be_left_out() {
        assert_eq!(None, form("  ").normalize(owner()).skills);
        assert_eq!(None, ProfileForm::default().normalize(owner()).skills);
    }

    #[test]
    fn empty_optional_fields_should_be_left_out() {
        let update = ProfileForm {
            location: Some("".to_string()),
            bio: Some("   ".to_string()),
            githubusername: None,
            skills: Some("rust".to_string()),
            linkedin: Some("".to_string()),
            instagram: None,
        }
        .normalize(owner());

        assert_eq!(owner(), update.owner);
        assert_eq!(None, update.location);
        assert_eq!(None, update.bio);
        assert_eq!(None, update.github_username);
        assert_eq!(Social::default(), update.social);
    }

    #[test]
    fn zero_like_values_should_be_kept() {
        let update = ProfileForm {
            location: Some("0".to_string()),
            skills: Some("0".to_string()),
            ..ProfileForm::default()
        }
        .normalize(owner());

        assert_eq!(Some("0"), update.location.as_deref());
        assert_eq!(Some(vec!["0".to_string()]), update.skills);
    }

    #[test]
    fn values_should_be_stored_as_given() {
        let update = ProfileForm {
            bio: Some(" I write Rust ".to_string()),
            skills: Some("rust".to_string()),
            ..ProfileForm::default()
        }
        .normalize(owner());

        assert_eq!(Some(" I write Rust "), update.bio.as_deref());
    }

    #[test]
    fn social_should_be_an_object_even_without_links() {
        let update = form("rust").normalize(owner());
        let json = serde_json::to_value(&update.social).unwrap();

        assert_eq!(serde_json::json!({}), json);
    }

    #[test]
    fn new_owner_scenario() {
        let update = ProfileForm {
            skills: Some("HTML,CSS, JavaScript".to_string()),
            linkedin: Some("https://li.example".to_string()),
            ..ProfileForm::default()
        }
        .normalize(owner());

        assert_eq!(
            Some(vec![
                "HTML".to_string(),
                "CSS".to_string(),
                "JavaScript".to_string()
            ]),
            update.skills
        );
        assert_eq!(
            serde_json::json!({ "linkedin": "https://li.example" }),
            serde_json::to_value(&update.social).unwrap()
        );
        assert_eq!(None, update.bio);
        assert_eq!(None, update.location);
        assert_eq!(None, update.github_username);
    }

    #[test]
    fn missing_skills_should_fail_validation() {
        assert_matches!(
            ProfileForm::default().validate(),
            Err(DcError::Validation(errors)) if errors.contains_key("skills")
        );
        assert_matches!(form("").validate(), Err(DcError::Validation(_)));
        assert_matches!(form("   ").validate(), Err(DcError::Validation(_)));
        assert_matches!(form(" , ,").validate(), Ok(()));
        assert_matches!(form("rust").validate(), Ok(()));
    }

    #[test]
    fn form_should_deserialize_from_partial_json() {
        let form: ProfileForm =
            serde_json::from_value(serde_json::json!({ "skills": "rust", "bio": "hi" })).unwrap();

        assert_eq!(Some("rust"), form.skills.as_deref());
        assert_eq!(Some("hi"), form.bio.as_deref());
        assert_eq!(None, form.location);
    }
}
