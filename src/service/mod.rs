//! CRUD service for people and gifts.
//!
//! Validates incoming requests, then hands them to the repository. Handlers
//! never talk to the repository directly.

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{
    is_valid_link, normalize_link, CreateGiftRequest, CreatePersonRequest, Gift, GiftFields,
    Person, ReorderRequest, UpdateGiftRequest, UpdatePersonRequest,
};
use crate::ordering::{Collection, ReorderPlan};

pub const NAME_REQUIRED: &str = "Name is required";
pub const DUPLICATE_NAME: &str = "A person with this name already exists";
pub const GIFT_FIELDS_REQUIRED: &str = "Person ID and Description are required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const INVALID_LINK: &str = "Invalid URL format";

/// How the server treats gift links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkPolicy {
    /// Store links verbatim; the browser validates before submitting.
    #[default]
    Lenient,
    /// Reject links that do not parse as absolute URLs.
    Strict,
}

impl LinkPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            LinkPolicy::Strict
        } else {
            LinkPolicy::Lenient
        }
    }
}

/// People and gift operations.
#[derive(Clone)]
pub struct GiftListService {
    repo: Repository,
    link_policy: LinkPolicy,
}

impl GiftListService {
    pub fn new(repo: Repository, link_policy: LinkPolicy) -> Self {
        Self { repo, link_policy }
    }

    // ==================== PEOPLE ====================

    pub async fn list_people(&self) -> Result<Vec<Person>, AppError> {
        self.repo.list_people().await
    }

    pub async fn create_person(&self, request: &CreatePersonRequest) -> Result<Person, AppError> {
        let name = validate_name(request.name.as_deref())?;
        let person = self.repo.create_person(name).await?;
        tracing::info!(person_id = person.id, order_index = person.order_index, "Created person");
        Ok(person)
    }

    pub async fn update_person(
        &self,
        id: i64,
        request: &UpdatePersonRequest,
    ) -> Result<(), AppError> {
        let name = validate_name(request.name.as_deref())?;
        let changed = self.repo.rename_person(id, name).await?;
        tracing::info!(person_id = id, rows = changed, "Renamed person");
        Ok(())
    }

    pub async fn delete_person(&self, id: i64) -> Result<(), AppError> {
        let removed = self.repo.delete_person(id).await?;
        tracing::info!(person_id = id, rows = removed, "Deleted person");
        Ok(())
    }

    pub async fn reorder_people(&self, request: &ReorderRequest) -> Result<(), AppError> {
        self.reorder(Collection::People, request).await
    }

    // ==================== GIFTS ====================

    pub async fn list_gifts(&self, person_id: i64) -> Result<Vec<Gift>, AppError> {
        self.repo.list_gifts(person_id).await
    }

    pub async fn create_gift(&self, request: &CreateGiftRequest) -> Result<Gift, AppError> {
        let (person_id, fields) = validate_new_gift(request, self.link_policy)?;
        let gift = self.repo.create_gift(person_id, &fields).await?;
        tracing::info!(gift_id = gift.id, person_id, "Created gift");
        Ok(gift)
    }

    pub async fn update_gift(&self, id: i64, request: &UpdateGiftRequest) -> Result<(), AppError> {
        let fields = validate_gift_edit(request, self.link_policy)?;
        let changed = self.repo.update_gift(id, &fields).await?;
        tracing::info!(gift_id = id, rows = changed, purchased = fields.purchased, "Updated gift");
        Ok(())
    }

    pub async fn delete_gift(&self, id: i64) -> Result<(), AppError> {
        let removed = self.repo.delete_gift(id).await?;
        tracing::info!(gift_id = id, rows = removed, "Deleted gift");
        Ok(())
    }

    pub async fn reorder_gifts(&self, request: &ReorderRequest) -> Result<(), AppError> {
        self.reorder(Collection::Gifts, request).await
    }

    async fn reorder(
        &self,
        collection: Collection,
        request: &ReorderRequest,
    ) -> Result<(), AppError> {
        let plan = ReorderPlan::from_ordered_ids(&request.ordered_ids)?;
        if plan.is_empty() {
            tracing::debug!(?collection, "Reorder request carries no ids");
        }
        let touched = self.repo.reorder(collection, &plan).await?;
        tracing::info!(
            ?collection,
            requested = plan.assignments().len(),
            rows = touched,
            "Reordered"
        );
        Ok(())
    }
}

fn validate_name(name: Option<&str>) -> Result<&str, AppError> {
    match name {
        Some(n) if !n.trim().is_empty() => Ok(n),
        _ => Err(AppError::Validation(NAME_REQUIRED.to_string())),
    }
}

fn validate_link(link: Option<String>, policy: LinkPolicy) -> Result<Option<String>, AppError> {
    match (&link, policy) {
        (Some(l), LinkPolicy::Strict) if !is_valid_link(l) => {
            Err(AppError::Validation(INVALID_LINK.to_string()))
        }
        _ => Ok(link),
    }
}

fn validate_new_gift(
    request: &CreateGiftRequest,
    policy: LinkPolicy,
) -> Result<(i64, GiftFields), AppError> {
    let (Some(person_id), Some(description)) = (request.person_id, non_blank(&request.description))
    else {
        return Err(AppError::Validation(GIFT_FIELDS_REQUIRED.to_string()));
    };

    let link = validate_link(normalize_link(request.link.as_deref()), policy)?;

    Ok((
        person_id,
        GiftFields {
            description: description.to_string(),
            link,
            purchased: request.purchased,
        },
    ))
}

fn validate_gift_edit(
    request: &UpdateGiftRequest,
    policy: LinkPolicy,
) -> Result<GiftFields, AppError> {
    let Some(description) = non_blank(&request.description) else {
        return Err(AppError::Validation(DESCRIPTION_REQUIRED.to_string()));
    };

    let link = validate_link(normalize_link(request.link.as_deref()), policy)?;

    Ok(GiftFields {
        description: description.to_string(),
        link,
        purchased: request.purchased,
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    use crate::db::init_database;

    async fn service(policy: LinkPolicy) -> (GiftListService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("service.sqlite"))
            .await
            .unwrap();
        (GiftListService::new(Repository::new(pool), policy), temp_dir)
    }

    fn person(name: &str) -> CreatePersonRequest {
        CreatePersonRequest {
            name: Some(name.to_string()),
        }
    }

    fn gift(person_id: i64, description: &str, link: Option<&str>) -> CreateGiftRequest {
        CreateGiftRequest {
            person_id: Some(person_id),
            description: Some(description.to_string()),
            link: link.map(str::to_string),
            purchased: false,
        }
    }

    #[test]
    fn test_blank_names_fail_validation() {
        for name in [None, Some(""), Some("   "), Some("\t\n")] {
            let err = validate_name(name).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
            assert_eq!(err.message(), NAME_REQUIRED);
        }
        assert_eq!(validate_name(Some(" Ann ")).unwrap(), " Ann ");
    }

    #[test]
    fn test_new_gift_requires_person_and_description() {
        let missing_person = CreateGiftRequest {
            person_id: None,
            ..gift(1, "Book", None)
        };
        let blank_description = gift(1, "  ", None);

        for request in [missing_person, blank_description] {
            let err = validate_new_gift(&request, LinkPolicy::Lenient).unwrap_err();
            assert_eq!(err.message(), GIFT_FIELDS_REQUIRED);
        }
    }

    #[test]
    fn test_empty_link_becomes_null() {
        let (_, fields) =
            validate_new_gift(&gift(1, "Book", Some("")), LinkPolicy::Strict).unwrap();
        assert_eq!(fields.link, None);
    }

    #[test]
    fn test_link_policy() {
        // The browser refuses malformed links; the lenient server stores them anyway.
        let request = gift(1, "Book", Some("not a url"));
        let (_, fields) = validate_new_gift(&request, LinkPolicy::Lenient).unwrap();
        assert_eq!(fields.link.as_deref(), Some("not a url"));

        let err = validate_new_gift(&request, LinkPolicy::Strict).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.message(), INVALID_LINK);

        let edit = UpdateGiftRequest {
            description: Some("Book".to_string()),
            link: Some("still not a url".to_string()),
            purchased: false,
        };
        assert!(validate_gift_edit(&edit, LinkPolicy::Lenient).is_ok());
        assert!(validate_gift_edit(&edit, LinkPolicy::Strict).is_err());
    }

    #[test]
    fn test_gift_edit_requires_description() {
        let edit = UpdateGiftRequest::default();
        let err = validate_gift_edit(&edit, LinkPolicy::Lenient).unwrap_err();
        assert_eq!(err.message(), DESCRIPTION_REQUIRED);
    }

    #[test]
    fn test_link_policy_from_flag() {
        assert_eq!(LinkPolicy::from_strict(true), LinkPolicy::Strict);
        assert_eq!(LinkPolicy::from_strict(false), LinkPolicy::Lenient);
        assert_eq!(LinkPolicy::default(), LinkPolicy::Lenient);
    }

    #[tokio::test]
    async fn test_case_variant_names_conflict() {
        let (svc, _dir) = service(LinkPolicy::Lenient).await;

        svc.create_person(&person("Grandma")).await.unwrap();
        let err = svc.create_person(&person("grandMA")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.message(), DUPLICATE_NAME);
    }

    #[tokio::test]
    async fn test_rename_validates_before_touching_store() {
        let (svc, _dir) = service(LinkPolicy::Lenient).await;

        let p = svc.create_person(&person("Uncle")).await.unwrap();
        let err = svc
            .update_person(p.id, &UpdatePersonRequest { name: Some(" ".to_string()) })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(svc.list_people().await.unwrap()[0].name, "Uncle");
    }

    #[tokio::test]
    async fn test_purchase_toggle_leaves_other_fields() {
        let (svc, _dir) = service(LinkPolicy::Lenient).await;

        let p = svc.create_person(&person("Sis")).await.unwrap();
        svc.create_gift(&gift(p.id, "Socks", None)).await.unwrap();
        let g = svc
            .create_gift(&gift(p.id, "Camera", Some("https://example.com/cam?x=1&y=2")))
            .await
            .unwrap();

        svc.update_gift(
            g.id,
            &UpdateGiftRequest {
                description: Some(g.description.clone()),
                link: g.link.clone(),
                purchased: true,
            },
        )
        .await
        .unwrap();

        let listed = svc.list_gifts(p.id).await.unwrap();
        let updated = listed.iter().find(|x| x.id == g.id).unwrap();
        assert!(updated.purchased);
        assert_eq!(updated.description, g.description);
        assert_eq!(updated.link, g.link);
        assert_eq!(updated.order_index, g.order_index);
        assert_eq!(updated.person_id, g.person_id);
    }

    #[tokio::test]
    async fn test_reorder_rejects_non_array_without_writing() {
        let (svc, _dir) = service(LinkPolicy::Lenient).await;

        svc.create_person(&person("A")).await.unwrap();
        svc.create_person(&person("B")).await.unwrap();
        let before = svc.list_people().await.unwrap();

        let err = svc
            .reorder_people(&ReorderRequest {
                ordered_ids: json!("2,1"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(svc.list_people().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_gift_reorder_with_string_ids() {
        let (svc, _dir) = service(LinkPolicy::Lenient).await;

        let p = svc.create_person(&person("Kid")).await.unwrap();
        let mut ids = Vec::new();
        for d in ["Lego", "Ball", "Book"] {
            ids.push(svc.create_gift(&gift(p.id, d, None)).await.unwrap().id);
        }

        let ordered: Vec<String> = [ids[2], ids[0], ids[1]]
            .iter()
            .map(|id| id.to_string())
            .collect();
        svc.reorder_gifts(&ReorderRequest {
            ordered_ids: json!(ordered),
        })
        .await
        .unwrap();

        let listed: Vec<String> = svc
            .list_gifts(p.id)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.description)
            .collect();
        assert_eq!(listed, vec!["Book", "Lego", "Ball"]);
    }
}
