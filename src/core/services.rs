use bcrypt::DEFAULT_COST;
use std::collections::HashSet;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::errors::PortalError;
use crate::core::models::{ContentItem, ContentKind, NewContent, User};
use crate::core::query::{
    self, ContentSortField, SortOrder, DEFAULT_LIMIT, DEFAULT_PAGE,
};
use crate::infrastructure::storage::Storage;

/// Raw content fields as received from a client, before validation.
#[derive(Debug, Clone, Default)]
pub struct ContentFields {
    pub title: String,
    pub kind: String,
    pub exam: String,
    pub url: String,
}

/// Partial update for a content item; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub exam: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ContentListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub kind: Option<String>,
    pub exam: Option<String>,
}

#[derive(Debug)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total_pages: u32,
}

#[derive(Debug)]
pub struct ContentPage {
    pub content: Vec<ContentItem>,
    pub total_pages: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub struct PortalStats {
    pub total_users: usize,
    pub active_exams: usize,
    pub content_uploads: usize,
}

/// All portal operations over an injected [`Storage`]. Every call is a full
/// load-modify-save cycle against the single persisted document; mutations
/// hold `write_lock` across the whole cycle so in-process cycles cannot
/// interleave and lose updates.
pub struct PortalService<S: Storage> {
    storage: S,
    write_lock: Mutex<()>,
    bcrypt_cost: u32,
}

impl<S: Storage> PortalService<S> {
    pub fn new(storage: S) -> Self {
        Self::with_bcrypt_cost(storage, DEFAULT_COST)
    }

    /// Tests use the minimum cost so hashing does not dominate the run.
    pub fn with_bcrypt_cost(storage: S, bcrypt_cost: u32) -> Self {
        PortalService {
            storage,
            write_lock: Mutex::new(()),
            bcrypt_cost,
        }
    }

    // USER MANAGEMENT

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, PortalError> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(PortalError::missing("Please provide all required fields."));
        }

        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.load().await?;
        if doc.users.iter().any(|u| u.email == email) {
            return Err(PortalError::EmailTaken);
        }

        let hash = bcrypt::hash(password, self.bcrypt_cost)?;
        let user = User::new(name.to_string(), email.to_string(), hash);
        doc.users.push(user.clone());
        self.storage.save(&doc).await?;

        info!(user_id = %user.id, email = %user.email, "new user registered");
        Ok(user)
    }

    /// Unknown email and wrong password fail identically so a caller cannot
    /// probe which emails are registered.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, PortalError> {
        if email.is_empty() || password.is_empty() {
            return Err(PortalError::missing("Please provide email and password."));
        }

        let doc = self.storage.load().await?;
        let user = doc
            .users
            .iter()
            .find(|u| u.email == email)
            .ok_or(PortalError::InvalidCredentials)?;

        if !bcrypt::verify(password, &user.password_hash)? {
            return Err(PortalError::InvalidCredentials);
        }
        Ok(user.clone())
    }

    pub async fn list_users(&self, query: UserListQuery) -> Result<UserPage, PortalError> {
        let doc = self.storage.load().await?;
        let page = query.page.unwrap_or(DEFAULT_PAGE);
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

        let mut users: Vec<User> = match query.search.as_deref().filter(|s| !s.is_empty()) {
            Some(search) => doc
                .users
                .into_iter()
                .filter(|u| query::matches_search(&[&u.name, &u.email], search))
                .collect(),
            None => doc.users,
        };
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total_pages = query::total_pages(users.len(), limit);
        Ok(UserPage {
            users: query::paginate(users, page, limit),
            total_pages,
        })
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, PortalError> {
        let doc = self.storage.load().await?;
        doc.users
            .into_iter()
            .find(|u| u.email == email)
            .ok_or(PortalError::UserNotFound)
    }

    pub async fn update_user(
        &self,
        id: Uuid,
        name: &str,
        email: &str,
    ) -> Result<User, PortalError> {
        if name.is_empty() || email.is_empty() {
            return Err(PortalError::missing("Name and email are required."));
        }

        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.load().await?;
        if doc.users.iter().any(|u| u.id != id && u.email == email) {
            return Err(PortalError::EmailTaken);
        }
        let user = doc
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(PortalError::UserNotFound)?;
        user.name = name.to_string();
        user.email = email.to_string();
        let updated = user.clone();
        self.storage.save(&doc).await?;

        debug!(user_id = %id, "user updated");
        Ok(updated)
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), PortalError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.load().await?;
        let before = doc.users.len();
        doc.users.retain(|u| u.id != id);
        if doc.users.len() == before {
            return Err(PortalError::UserNotFound);
        }
        self.storage.save(&doc).await?;

        info!(user_id = %id, "user deleted");
        Ok(())
    }

    pub async fn change_user_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), PortalError> {
        if email.is_empty() || old_password.is_empty() || new_password.is_empty() {
            return Err(PortalError::missing(
                "Email, old password, and new password are required.",
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.load().await?;
        let user = doc
            .users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or(PortalError::UserNotFound)?;

        if !bcrypt::verify(old_password, &user.password_hash)? {
            return Err(PortalError::IncorrectOldPassword);
        }
        user.password_hash = bcrypt::hash(new_password, self.bcrypt_cost)?;
        self.storage.save(&doc).await?;

        info!(email = %email, "user password changed");
        Ok(())
    }

    // ADMIN CREDENTIAL

    /// Seeds the admin hash from the configured default on first startup.
    /// A document that already carries a hash is left alone.
    pub async fn ensure_admin_password(&self, default_password: &str) -> Result<(), PortalError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.load().await?;
        if !doc.admin.password_hash.is_empty() {
            return Ok(());
        }
        doc.admin.password_hash = bcrypt::hash(default_password, self.bcrypt_cost)?;
        self.storage.save(&doc).await?;

        info!("admin credential seeded from configuration");
        Ok(())
    }

    pub async fn admin_login(&self, password: &str) -> Result<(), PortalError> {
        if password.is_empty() {
            return Err(PortalError::missing("Password is required."));
        }

        let doc = self.storage.load().await?;
        if doc.admin.password_hash.is_empty()
            || !bcrypt::verify(password, &doc.admin.password_hash)?
        {
            return Err(PortalError::IncorrectAdminPassword);
        }
        Ok(())
    }

    pub async fn change_admin_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), PortalError> {
        if current_password.is_empty() || new_password.is_empty() {
            return Err(PortalError::missing(
                "Current and new passwords are required.",
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.load().await?;
        if doc.admin.password_hash.is_empty()
            || !bcrypt::verify(current_password, &doc.admin.password_hash)?
        {
            return Err(PortalError::IncorrectCurrentPassword);
        }
        doc.admin.password_hash = bcrypt::hash(new_password, self.bcrypt_cost)?;
        self.storage.save(&doc).await?;

        info!("admin password rotated");
        Ok(())
    }

    // DASHBOARD

    pub async fn stats(&self) -> Result<PortalStats, PortalError> {
        let doc = self.storage.load().await?;
        let exams: HashSet<&str> = doc.content.iter().map(|c| c.exam.as_str()).collect();
        Ok(PortalStats {
            total_users: doc.users.len(),
            active_exams: exams.len(),
            content_uploads: doc.content.len(),
        })
    }

    // CONTENT MANAGEMENT

    pub async fn list_content(
        &self,
        query: ContentListQuery,
    ) -> Result<ContentPage, PortalError> {
        let doc = self.storage.load().await?;
        let page = query.page.unwrap_or(DEFAULT_PAGE);
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
        let kind_filter = match query.kind.as_deref().filter(|k| !k.is_empty()) {
            Some(raw) => Some(ContentKind::parse(raw)?),
            None => None,
        };

        let mut content: Vec<ContentItem> = doc
            .content
            .into_iter()
            .filter(|item| {
                kind_filter.is_none_or(|kind| item.kind == kind)
                    && query
                        .exam
                        .as_deref()
                        .filter(|e| !e.is_empty())
                        .is_none_or(|exam| item.exam == exam)
                    && query
                        .search
                        .as_deref()
                        .filter(|s| !s.is_empty())
                        .is_none_or(|search| query::matches_search(&[&item.title], search))
            })
            .collect();

        query::sort_content(
            &mut content,
            ContentSortField::parse(query.sort_by.as_deref()),
            SortOrder::parse(query.sort_order.as_deref()),
        );

        let total_pages = query::total_pages(content.len(), limit);
        Ok(ContentPage {
            content: query::paginate(content, page, limit),
            total_pages,
        })
    }

    pub async fn get_content(&self, id: Uuid) -> Result<ContentItem, PortalError> {
        let doc = self.storage.load().await?;
        doc.content
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(PortalError::ContentNotFound)
    }

    pub async fn add_content(&self, fields: ContentFields) -> Result<ContentItem, PortalError> {
        let new = validate_content_fields(&fields, "All fields are required.")?;

        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.load().await?;
        let item = ContentItem::from_new(new);
        doc.content.push(item.clone());
        self.storage.save(&doc).await?;

        info!(content_id = %item.id, title = %item.title, "content added");
        Ok(item)
    }

    /// All-or-nothing: the whole batch is validated before anything is
    /// appended, so one malformed record rejects every record.
    pub async fn add_content_bulk(
        &self,
        items: Vec<ContentFields>,
    ) -> Result<usize, PortalError> {
        if items.is_empty() {
            return Err(PortalError::missing(
                "Content array is required and cannot be empty.",
            ));
        }
        let validated: Vec<NewContent> = items
            .iter()
            .map(|fields| {
                validate_content_fields(
                    fields,
                    "One or more content items are missing required fields (title, type, exam, url).",
                )
            })
            .collect::<Result<_, _>>()?;

        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.load().await?;
        let count = validated.len();
        doc.content
            .extend(validated.into_iter().map(ContentItem::from_new));
        self.storage.save(&doc).await?;

        info!(count, "bulk content inserted");
        Ok(count)
    }

    pub async fn update_content(
        &self,
        id: Uuid,
        update: ContentUpdate,
    ) -> Result<ContentItem, PortalError> {
        let kind = match update.kind.as_deref() {
            Some(raw) => Some(ContentKind::parse(raw)?),
            None => None,
        };
        for field in [&update.title, &update.exam, &update.url] {
            if field.as_deref() == Some("") {
                return Err(PortalError::missing("Provided fields cannot be empty."));
            }
        }

        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.load().await?;
        let item = doc
            .content
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(PortalError::ContentNotFound)?;
        if let Some(title) = update.title {
            item.title = title;
        }
        if let Some(kind) = kind {
            item.kind = kind;
        }
        if let Some(exam) = update.exam {
            item.exam = exam;
        }
        if let Some(url) = update.url {
            item.url = url;
        }
        let updated = item.clone();
        self.storage.save(&doc).await?;

        debug!(content_id = %id, "content updated");
        Ok(updated)
    }

    pub async fn delete_content(&self, id: Uuid) -> Result<(), PortalError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.load().await?;
        let before = doc.content.len();
        doc.content.retain(|c| c.id != id);
        if doc.content.len() == before {
            return Err(PortalError::ContentNotFound);
        }
        self.storage.save(&doc).await?;

        info!(content_id = %id, "content deleted");
        Ok(())
    }

    // SEEDING

    /// One-time startup pass. Skips itself when any content already exists
    /// and deduplicates the scanned batch by URL, keeping the first entry.
    pub async fn seed_content(&self, items: Vec<NewContent>) -> Result<usize, PortalError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.load().await?;
        if !doc.content.is_empty() {
            info!("content collection is not empty; skipping seeding");
            return Ok(0);
        }

        let mut seen = HashSet::new();
        let unique: Vec<NewContent> = items
            .into_iter()
            .filter(|item| seen.insert(item.url.clone()))
            .collect();
        if unique.is_empty() {
            return Ok(0);
        }

        let count = unique.len();
        doc.content
            .extend(unique.into_iter().map(ContentItem::from_new));
        self.storage.save(&doc).await?;

        info!(count, "seeded content items from static pages");
        Ok(count)
    }
}

fn validate_content_fields(
    fields: &ContentFields,
    missing_message: &str,
) -> Result<NewContent, PortalError> {
    if fields.title.is_empty()
        || fields.kind.is_empty()
        || fields.exam.is_empty()
        || fields.url.is_empty()
    {
        return Err(PortalError::missing(missing_message));
    }
    Ok(NewContent {
        title: fields.title.clone(),
        kind: ContentKind::parse(&fields.kind)?,
        exam: fields.exam.clone(),
        url: fields.url.clone(),
    })
}
