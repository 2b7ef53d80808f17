use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    ChatMessage, CreateRiskRequest, CreateTreatyRequest, Notification, Risk, RiskStatus,
    RiskWithSubmitter, Role, Treaty, TreatyStatus, TreatyType, User,
};

/// RepoError
///
/// Failures the persistence seam can report. Handlers log these and surface the
/// generic JSON error payload.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("unknown submitter {0}")]
    UnknownSubmitter(Uuid),

    #[error("record not found")]
    NotFound,
}

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. The persistence
/// layer is an opaque CRUD store keyed by entity id; handlers interact with this
/// trait and never with a concrete backend.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable across Axum's asynchronous task
/// boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Risks ---
    // New risks always start in Draft regardless of anything the client sends.
    async fn create_risk(&self, req: CreateRiskRequest) -> Result<Risk, RepoError>;
    // Listing joins the submitter's name and email onto each row.
    async fn list_risks(&self) -> Result<Vec<RiskWithSubmitter>, RepoError>;
    async fn get_risk(&self, id: Uuid) -> Option<RiskWithSubmitter>;

    // --- Treaties ---
    async fn create_treaty(&self, req: CreateTreatyRequest) -> Result<Treaty, RepoError>;
    async fn list_treaties(&self) -> Result<Vec<Treaty>, RepoError>;
    async fn get_treaty(&self, id: Uuid) -> Option<Treaty>;

    // --- Widgets ---
    // Notifications are keyed by recipient display name; the cookies carry no id.
    async fn notifications_for(&self, recipient: &str) -> Vec<Notification>;
    async fn mark_notification_read(&self, id: Uuid, recipient: &str) -> bool;
    async fn list_chat_messages(&self) -> Vec<ChatMessage>;
    async fn post_chat_message(&self, sender: String, body: String) -> ChatMessage;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

// Stable ids for the seeded members, usable from tests and debug tooling.
pub const SEED_BROKER_ID: Uuid = Uuid::from_u128(0xA11CE);
pub const SEED_INSURER_ID: Uuid = Uuid::from_u128(0xB0B);
pub const SEED_REINSURER_ID: Uuid = Uuid::from_u128(0xCA51);

pub const SEED_BROKER_NAME: &str = "Aoife Brennan";
pub const SEED_INSURER_NAME: &str = "Tomas Keller";
pub const SEED_REINSURER_NAME: &str = "Margit Olsen";

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    risks: Vec<Risk>,
    treaties: Vec<Treaty>,
    notifications: Vec<Notification>,
    chat: Vec<ChatMessage>,
}

/// InMemoryRepository
///
/// The concrete implementation of the `Repository` trait, backed by an in-process
/// map. The portal's data is largely mock or hard-coded, so the seeded instance
/// is the production configuration, not just a test double.
pub struct InMemoryRepository {
    inner: RwLock<Inner>,
}

impl InMemoryRepository {
    /// An empty store. Mostly useful for tests that want full control of contents.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// The canonical startup store: three members (one per role), a couple of
    /// treaties, and enough notification/chat lines to populate the widgets.
    pub fn seeded() -> Self {
        let repo = Self::new();
        {
            let mut inner = repo.inner.try_write().expect("fresh store is uncontended");
            let now = Utc::now();

            inner.users.insert(
                SEED_BROKER_ID,
                User {
                    id: SEED_BROKER_ID,
                    name: SEED_BROKER_NAME.to_string(),
                    email: "aoife.brennan@harborlight.example".to_string(),
                    role: Role::Broker,
                    company: "Harborlight Brokers".to_string(),
                },
            );
            inner.users.insert(
                SEED_INSURER_ID,
                User {
                    id: SEED_INSURER_ID,
                    name: SEED_INSURER_NAME.to_string(),
                    email: "tomas.keller@atlasmutual.example".to_string(),
                    role: Role::Insurer,
                    company: "Atlas Mutual".to_string(),
                },
            );
            inner.users.insert(
                SEED_REINSURER_ID,
                User {
                    id: SEED_REINSURER_ID,
                    name: SEED_REINSURER_NAME.to_string(),
                    email: "margit.olsen@nordre-re.example".to_string(),
                    role: Role::Reinsurer,
                    company: "Nordre Re".to_string(),
                },
            );

            inner.treaties.push(Treaty {
                id: Uuid::new_v4(),
                name: "Property Cat XL 2026".to_string(),
                treaty_type: TreatyType::ExcessOfLoss,
                cedent: "Atlas Mutual".to_string(),
                reinsurer_share_pct: 35.0,
                status: TreatyStatus::Active,
                created_at: now,
                updated_at: now,
            });
            inner.treaties.push(Treaty {
                id: Uuid::new_v4(),
                name: "Marine Quota Share 2025".to_string(),
                treaty_type: TreatyType::QuotaShare,
                cedent: "Atlas Mutual".to_string(),
                reinsurer_share_pct: 20.0,
                status: TreatyStatus::Expired,
                created_at: now,
                updated_at: now,
            });

            inner.notifications.push(Notification {
                id: Uuid::new_v4(),
                recipient: SEED_BROKER_NAME.to_string(),
                message: "Your risk 'Warehouse fire portfolio' moved to Submitted".to_string(),
                is_read: false,
                created_at: now,
            });
            inner.notifications.push(Notification {
                id: Uuid::new_v4(),
                recipient: SEED_REINSURER_NAME.to_string(),
                message: "Property Cat XL 2026 renewal opens next week".to_string(),
                is_read: false,
                created_at: now,
            });

            inner.chat.push(ChatMessage {
                id: Uuid::new_v4(),
                sender: SEED_INSURER_NAME.to_string(),
                body: "Placement slip for the cat layer is uploaded.".to_string(),
                sent_at: now,
            });
        }
        repo
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    /// create_risk
    ///
    /// Inserts a new risk in Draft status. The submitter must be a known member;
    /// the premium string arrives pre-validated by the handler and is stored verbatim.
    async fn create_risk(&self, req: CreateRiskRequest) -> Result<Risk, RepoError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&req.submitter_id) {
            return Err(RepoError::UnknownSubmitter(req.submitter_id));
        }

        let now = Utc::now();
        let risk = Risk {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            premium: req.premium,
            coverage: req.coverage,
            status: RiskStatus::Draft,
            submitter_id: req.submitter_id,
            created_at: now,
            updated_at: now,
        };
        inner.risks.push(risk.clone());
        Ok(risk)
    }

    /// list_risks
    ///
    /// Returns all risks, newest first, with the submitter's name and email joined
    /// from the member records.
    async fn list_risks(&self) -> Result<Vec<RiskWithSubmitter>, RepoError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<RiskWithSubmitter> = inner
            .risks
            .iter()
            .map(|risk| join_submitter(risk, &inner.users))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_risk(&self, id: Uuid) -> Option<RiskWithSubmitter> {
        let inner = self.inner.read().await;
        inner
            .risks
            .iter()
            .find(|r| r.id == id)
            .map(|risk| join_submitter(risk, &inner.users))
    }

    async fn create_treaty(&self, req: CreateTreatyRequest) -> Result<Treaty, RepoError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let treaty = Treaty {
            id: Uuid::new_v4(),
            name: req.name,
            treaty_type: req.treaty_type,
            cedent: req.cedent,
            reinsurer_share_pct: req.reinsurer_share_pct,
            status: TreatyStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        inner.treaties.push(treaty.clone());
        Ok(treaty)
    }

    async fn list_treaties(&self) -> Result<Vec<Treaty>, RepoError> {
        let inner = self.inner.read().await;
        let mut treaties = inner.treaties.clone();
        treaties.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(treaties)
    }

    async fn get_treaty(&self, id: Uuid) -> Option<Treaty> {
        let inner = self.inner.read().await;
        inner.treaties.iter().find(|t| t.id == id).cloned()
    }

    async fn notifications_for(&self, recipient: &str) -> Vec<Notification> {
        let inner = self.inner.read().await;
        inner
            .notifications
            .iter()
            .filter(|n| n.recipient == recipient)
            .cloned()
            .collect()
    }

    /// mark_notification_read
    ///
    /// Flips `is_read`, enforced by a recipient check: returns false if the
    /// notification does not exist or belongs to someone else.
    async fn mark_notification_read(&self, id: Uuid, recipient: &str) -> bool {
        let mut inner = self.inner.write().await;
        match inner
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.recipient == recipient)
        {
            Some(n) => {
                n.is_read = true;
                true
            }
            None => false,
        }
    }

    async fn list_chat_messages(&self) -> Vec<ChatMessage> {
        let inner = self.inner.read().await;
        inner.chat.clone()
    }

    async fn post_chat_message(&self, sender: String, body: String) -> ChatMessage {
        let mut inner = self.inner.write().await;
        let message = ChatMessage {
            id: Uuid::new_v4(),
            sender,
            body,
            sent_at: Utc::now(),
        };
        inner.chat.push(message.clone());
        message
    }
}

fn join_submitter(risk: &Risk, users: &HashMap<Uuid, User>) -> RiskWithSubmitter {
    let (submitter_name, submitter_email) = users
        .get(&risk.submitter_id)
        .map(|u| (u.name.clone(), u.email.clone()))
        .unwrap_or_default();

    RiskWithSubmitter {
        id: risk.id,
        title: risk.title.clone(),
        description: risk.description.clone(),
        premium: risk.premium.clone(),
        coverage: risk.coverage.clone(),
        status: risk.status,
        submitter_id: risk.submitter_id,
        submitter_name,
        submitter_email,
        created_at: risk.created_at,
        updated_at: risk.updated_at,
    }
}
