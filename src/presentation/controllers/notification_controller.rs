use crate::{
    domain::{entities::NotificationFilter, services::DynNotificationSyncService},
    presentation::dtos::{
        ErrorNotice, NotificationFeedResponse, NotificationFilterRequest,
        NotificationListResponse, NotificationResponse,
    },
    presentation::middleware::ValidationMiddlewareError,
};
use validator::Validate;

pub struct NotificationController {
    sync: DynNotificationSyncService,
}

impl NotificationController {
    pub fn new(sync: DynNotificationSyncService) -> Self {
        Self { sync }
    }

    /// Current unread feed. Served from local state only.
    pub fn feed(&self) -> NotificationFeedResponse {
        self.sync.state().into()
    }

    pub fn unread_count(&self) -> usize {
        self.sync.unread_count()
    }

    pub async fn refresh(&self) -> Result<NotificationFeedResponse, ErrorNotice> {
        self.sync.refresh().await?;
        Ok(self.feed())
    }

    pub async fn list_notifications(
        &self,
        filter: Option<NotificationFilterRequest>,
    ) -> Result<NotificationListResponse, ErrorNotice> {
        let filter: NotificationFilter = match filter {
            Some(request) => {
                request
                    .validate()
                    .map_err(ValidationMiddlewareError::ValidationFailed)?;
                request.into()
            }
            None => NotificationFilter::default(),
        };
        let notifications: Vec<NotificationResponse> = self
            .sync
            .fetch_notifications(&filter)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(NotificationListResponse {
            total: notifications.len(),
            notifications,
        })
    }

    pub async fn mark_as_read(&self, id: i64) -> Result<NotificationFeedResponse, ErrorNotice> {
        self.sync.mark_as_read(id).await?;
        Ok(self.feed())
    }

    pub async fn delete_notification(
        &self,
        id: i64,
    ) -> Result<NotificationFeedResponse, ErrorNotice> {
        self.sync.delete_notification(id).await?;
        Ok(self.feed())
    }
}
