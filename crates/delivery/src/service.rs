//! Delivery status machine and its event side effects.

use common::{Address, CourierId, DeliveryId, OrderId, Recipient, RpcError, StoreError};
use events::{EventPublisher, IntegrationEvent};
use thiserror::Error;

use crate::delivery::Delivery;
use crate::orders::OrderDirectory;
use crate::status::DeliveryStatus;
use crate::store::DeliveryStore;

/// Errors that can occur during delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryServiceError {
    /// Delivery persistence failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The order-service owner lookup failed at the transport level.
    #[error("order service error: {0}")]
    OrderService(#[from] RpcError),
}

/// Outcome of a status-change request.
///
/// Rejections are tagged rather than collapsed into one absent value, so
/// callers can tell a missing delivery from a disallowed transition.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryStatusChange {
    /// The transition was applied and persisted.
    Updated(Delivery),

    /// No delivery exists with the requested ID.
    NotFound,

    /// The status machine does not allow this transition.
    InvalidTransition {
        /// Status the delivery is currently in.
        from: DeliveryStatus,
        /// Status that was requested.
        to: DeliveryStatus,
    },

    /// The cancellation was persisted but the order's owner could not be
    /// resolved, so no `DeliveryCanceled` event was published. The status
    /// change is NOT rolled back; callers observing this outcome must not
    /// assume the delivery is still in its previous state.
    OwnerUnresolved,
}

/// Drives the delivery lifecycle.
pub struct DeliveryService<S, D, P>
where
    S: DeliveryStore,
    D: OrderDirectory,
    P: EventPublisher,
{
    store: S,
    orders: D,
    publisher: P,
}

impl<S, D, P> DeliveryService<S, D, P>
where
    S: DeliveryStore,
    D: OrderDirectory,
    P: EventPublisher,
{
    /// Creates a new delivery service.
    pub fn new(store: S, orders: D, publisher: P) -> Self {
        Self {
            store,
            orders,
            publisher,
        }
    }

    /// Provisions a pending delivery for an order.
    #[tracing::instrument(skip(self, address, recipient))]
    pub async fn create_delivery(
        &self,
        order_id: OrderId,
        courier_id: CourierId,
        address: Address,
        recipient: Recipient,
        tracking_number: Option<String>,
    ) -> Result<Delivery, DeliveryServiceError> {
        let mut delivery = Delivery::new(order_id, courier_id, address, recipient);
        if let Some(tn) = tracking_number {
            delivery = delivery.with_tracking_number(tn);
        }

        self.store.save(delivery.clone()).await?;
        metrics::counter!("deliveries_created_total").increment(1);
        tracing::info!(delivery_id = %delivery.id, %order_id, "delivery created");

        Ok(delivery)
    }

    /// Moves a delivery to a new status.
    ///
    /// Validated transitions are persisted before any event publication, so
    /// the status change survives a downstream failure. `Delivered`
    /// publishes `DeliveryDelivered`; `Canceled` resolves the order owner
    /// and publishes `DeliveryCanceled`, falling back to
    /// [`DeliveryStatusChange::OwnerUnresolved`] when the owner is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn change_status(
        &self,
        delivery_id: DeliveryId,
        target: DeliveryStatus,
    ) -> Result<DeliveryStatusChange, DeliveryServiceError> {
        let Some(mut delivery) = self.store.get(delivery_id).await? else {
            return Ok(DeliveryStatusChange::NotFound);
        };

        let from = delivery.status;
        if !from.can_transition_to(target) {
            tracing::warn!(%delivery_id, %from, to = %target, "invalid delivery transition");
            return Ok(DeliveryStatusChange::InvalidTransition { from, to: target });
        }

        // Persist first; event publication must never roll this back.
        delivery.set_status(target);
        self.store.save(delivery.clone()).await?;
        metrics::counter!("delivery_status_changes_total").increment(1);
        tracing::info!(%delivery_id, %from, to = %target, "delivery status changed");

        match target {
            DeliveryStatus::Delivered => {
                self.publish(IntegrationEvent::delivery_delivered(delivery.order_id))
                    .await;
                Ok(DeliveryStatusChange::Updated(delivery))
            }
            DeliveryStatus::Canceled => {
                match self.orders.user_id_by_order(delivery.order_id).await? {
                    Some(user_id) => {
                        self.publish(IntegrationEvent::delivery_canceled(
                            delivery.order_id,
                            user_id,
                        ))
                        .await;
                        Ok(DeliveryStatusChange::Updated(delivery))
                    }
                    None => {
                        metrics::counter!("delivery_cancel_owner_misses_total").increment(1);
                        tracing::warn!(
                            %delivery_id,
                            order_id = %delivery.order_id,
                            "cancellation persisted but order owner unknown, event not published"
                        );
                        Ok(DeliveryStatusChange::OwnerUnresolved)
                    }
                }
            }
            _ => Ok(DeliveryStatusChange::Updated(delivery)),
        }
    }

    /// Returns the current status of the delivery for an order, if one exists.
    #[tracing::instrument(skip(self))]
    pub async fn status_by_order(
        &self,
        order_id: OrderId,
    ) -> Result<Option<DeliveryStatus>, DeliveryServiceError> {
        Ok(self
            .store
            .find_by_order(order_id)
            .await?
            .map(|d| d.status))
    }

    async fn publish(&self, event: IntegrationEvent) {
        // Fire-and-forget: the local write already committed.
        if let Err(e) = self.publisher.publish(event).await {
            tracing::warn!(error = %e, "integration event publish failed");
        }
    }
}
