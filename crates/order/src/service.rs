//! Order status machine.

use common::OrderId;
use delivery::DeliveryStatus;
use events::{EventPublisher, IntegrationEvent};

use crate::clients::DeliveryClient;
use crate::error::OrderServiceError;
use crate::order::Order;
use crate::status::OrderStatus;
use crate::store::OrderStore;

/// Outcome of a status-change request.
///
/// Rejections are tagged rather than collapsed into one absent value, so
/// callers can tell a missing order from a disallowed transition.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderStatusChange {
    /// The transition was applied and persisted.
    Updated(Order),

    /// No order exists with the requested ID.
    NotFound,

    /// The status machine does not allow this transition.
    InvalidTransition {
        /// Status the order is currently in.
        from: OrderStatus,
        /// Status that was requested.
        to: OrderStatus,
    },

    /// The transition to `Completed` was locally valid but the delivery
    /// service did not confirm the delivery as `Delivered`. No state was
    /// changed and no event was published.
    DeliveryNotConfirmed,
}

/// Drives the customer-visible order lifecycle.
pub struct OrderStatusService<S, D, P>
where
    S: OrderStore,
    D: DeliveryClient,
    P: EventPublisher,
{
    store: S,
    deliveries: D,
    publisher: P,
}

impl<S, D, P> OrderStatusService<S, D, P>
where
    S: OrderStore,
    D: DeliveryClient,
    P: EventPublisher,
{
    /// Creates a new order status service.
    pub fn new(store: S, deliveries: D, publisher: P) -> Self {
        Self {
            store,
            deliveries,
            publisher,
        }
    }

    /// Moves an order to a new status.
    ///
    /// Validates the transition against the machine's table; the
    /// `Completed` target additionally requires the delivery service to
    /// report the order's delivery as `Delivered`, the one cross-service
    /// consistency gate in the pipeline. Valid transitions are persisted
    /// and publish `OrderStatusChanged`.
    #[tracing::instrument(skip(self))]
    pub async fn change_status(
        &self,
        order_id: OrderId,
        target: OrderStatus,
    ) -> Result<OrderStatusChange, OrderServiceError> {
        let Some(mut order) = self.store.get(order_id).await? else {
            return Ok(OrderStatusChange::NotFound);
        };

        let from = order.status;
        if !from.can_transition_to(target) {
            tracing::warn!(%order_id, %from, to = %target, "invalid order transition");
            return Ok(OrderStatusChange::InvalidTransition { from, to: target });
        }

        if target == OrderStatus::Completed {
            let delivery_status = self.deliveries.delivery_status(order_id).await?;
            if delivery_status != Some(DeliveryStatus::Delivered) {
                tracing::warn!(
                    %order_id,
                    ?delivery_status,
                    "completion rejected, delivery not confirmed as delivered"
                );
                return Ok(OrderStatusChange::DeliveryNotConfirmed);
            }
        }

        order.set_status(target);
        self.store.save(order.clone()).await?;
        metrics::counter!("order_status_changes_total").increment(1);
        tracing::info!(%order_id, %from, to = %target, "order status changed");

        // Fire-and-forget: the local write already committed.
        if let Err(e) = self
            .publisher
            .publish(IntegrationEvent::order_status_changed(
                order_id,
                target.as_str(),
            ))
            .await
        {
            tracing::warn!(error = %e, "integration event publish failed");
        }

        Ok(OrderStatusChange::Updated(order))
    }
}
