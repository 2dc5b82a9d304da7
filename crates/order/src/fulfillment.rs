//! Fulfillment coordination: order creation, events, delivery, payment.

use common::{Address, CourierId, DeliveryId, Money, OrderId, ProductId, Recipient, UserId};
use events::{EventLine, EventPublisher, IntegrationEvent};

use crate::clients::{DeliveryClient, PaymentGateway};
use crate::error::OrderServiceError;
use crate::order::{Order, OrderItem};
use crate::status::InternalOrderStatus;
use crate::store::OrderStore;

/// One line of an incoming fulfillment payload.
#[derive(Debug, Clone)]
pub struct OrderLine {
    /// The product ordered.
    pub product_id: ProductId,
    /// Product name snapshot taken when the line entered the cart.
    pub product_name: String,
    /// Ordered quantity.
    pub quantity: u32,
    /// Unit price snapshot taken when the line entered the cart.
    pub unit_price: Money,
}

/// Payload for creating an order with its delivery and payment session.
#[derive(Debug, Clone)]
pub struct FulfillmentRequest {
    /// The user placing the order.
    pub user_id: UserId,
    /// Total price snapshot computed by the caller.
    pub total_price: Money,
    /// Free-text note from the customer.
    pub note: String,
    /// The courier to assign to the delivery.
    pub courier_id: CourierId,
    /// Destination address.
    pub address: Address,
    /// Who receives the package.
    pub recipient: Recipient,
    /// The ordered lines.
    pub items: Vec<OrderLine>,
}

/// Result of a fulfillment attempt.
///
/// `order_id` is always present; the other two fields are independently
/// nullable and encode which downstream provisioning step did not produce
/// a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentOutcome {
    /// The created order.
    pub order_id: OrderId,
    /// The provisioned delivery, if delivery creation succeeded.
    pub delivery_id: Option<DeliveryId>,
    /// The payment checkout URL, if a session was opened.
    pub checkout_url: Option<String>,
}

/// Coordinates order fulfillment.
///
/// Creates the order, publishes the two creation events exactly once, then
/// attempts delivery and payment provisioning strictly in sequence. A
/// delivery failure is compensated by recording
/// [`InternalOrderStatus::DeliveryFailed`] on the order, never by rolling
/// the order back; a payment failure only leaves the checkout URL absent.
pub struct FulfillmentCoordinator<S, D, G, P>
where
    S: OrderStore,
    D: DeliveryClient,
    G: PaymentGateway,
    P: EventPublisher,
{
    store: S,
    deliveries: D,
    payments: G,
    publisher: P,
}

impl<S, D, G, P> FulfillmentCoordinator<S, D, G, P>
where
    S: OrderStore,
    D: DeliveryClient,
    G: PaymentGateway,
    P: EventPublisher,
{
    /// Creates a new fulfillment coordinator.
    pub fn new(store: S, deliveries: D, payments: G, publisher: P) -> Self {
        Self {
            store,
            deliveries,
            payments,
            publisher,
        }
    }

    /// Creates an order and provisions its delivery and payment session.
    ///
    /// Never fails for business-level reasons; only store faults propagate.
    #[tracing::instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn create_order_and_delivery(
        &self,
        request: FulfillmentRequest,
    ) -> Result<FulfillmentOutcome, OrderServiceError> {
        let fulfillment_start = std::time::Instant::now();

        // 1. Persist the order. This is the point of no return: the two
        //    creation events below fire exactly once per created order.
        let items = request
            .items
            .iter()
            .map(|line| OrderItem::new(line.product_id.clone(), line.quantity))
            .collect();
        let mut order = Order::new(request.user_id, request.total_price, request.note, items);
        let order_id = order.id;
        self.store.save(order.clone()).await?;

        metrics::counter!("fulfillment_orders_created_total").increment(1);
        tracing::info!(%order_id, total = %request.total_price, "order created");

        // 2. Publish the creation events, best effort, exactly once.
        let event_lines: Vec<EventLine> = request
            .items
            .iter()
            .map(|line| EventLine::new(line.product_id.clone(), line.quantity))
            .collect();
        self.publish(IntegrationEvent::order_created(
            order_id,
            request.user_id,
            event_lines.clone(),
        ))
        .await;
        self.publish(IntegrationEvent::order_items_reserved(order_id, event_lines))
            .await;

        // 3. Provision the delivery. Failure is recorded, not propagated.
        let delivery_id = match self
            .deliveries
            .create_delivery(
                request.courier_id,
                order_id,
                request.address,
                request.recipient,
            )
            .await
        {
            Ok(delivery_id) => {
                tracing::info!(%order_id, %delivery_id, "delivery provisioned");
                Some(delivery_id)
            }
            Err(e) => {
                metrics::counter!("fulfillment_delivery_failures_total").increment(1);
                tracing::warn!(%order_id, error = %e, "delivery creation failed, recorded on order");
                order.set_internal_status(InternalOrderStatus::DeliveryFailed);
                self.store.save(order.clone()).await?;
                None
            }
        };

        // 4. Open a payment session regardless of the delivery outcome.
        let checkout_url = match self
            .payments
            .create_checkout_session(order_id, request.total_price)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(%order_id, error = %e, "payment session creation failed");
                None
            }
        };

        metrics::histogram!("fulfillment_duration_seconds")
            .record(fulfillment_start.elapsed().as_secs_f64());

        Ok(FulfillmentOutcome {
            order_id,
            delivery_id,
            checkout_url,
        })
    }

    async fn publish(&self, event: IntegrationEvent) {
        // Fire-and-forget: the local write already committed.
        if let Err(e) = self.publisher.publish(event).await {
            tracing::warn!(error = %e, "integration event publish failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{InMemoryDeliveryClient, InMemoryPaymentGateway};
    use crate::store::InMemoryOrderStore;
    use events::InMemoryEventBus;

    struct Fixture {
        coordinator: FulfillmentCoordinator<
            InMemoryOrderStore,
            InMemoryDeliveryClient,
            InMemoryPaymentGateway,
            InMemoryEventBus,
        >,
        store: InMemoryOrderStore,
        deliveries: InMemoryDeliveryClient,
        payments: InMemoryPaymentGateway,
        bus: InMemoryEventBus,
    }

    fn fixture() -> Fixture {
        let store = InMemoryOrderStore::new();
        let deliveries = InMemoryDeliveryClient::new();
        let payments = InMemoryPaymentGateway::new();
        let bus = InMemoryEventBus::new();
        let coordinator = FulfillmentCoordinator::new(
            store.clone(),
            deliveries.clone(),
            payments.clone(),
            bus.clone(),
        );
        Fixture {
            coordinator,
            store,
            deliveries,
            payments,
            bus,
        }
    }

    fn request() -> FulfillmentRequest {
        FulfillmentRequest {
            user_id: UserId::new(),
            total_price: Money::from_cents(2008),
            note: "leave at the door".to_string(),
            courier_id: CourierId::new(),
            address: Address::new("Springfield", "742 Evergreen Terrace"),
            recipient: Recipient::new("Homer Simpson", "+1-555-0100"),
            items: vec![
                OrderLine {
                    product_id: ProductId::new("SKU-001"),
                    product_name: "Widget".to_string(),
                    quantity: 2,
                    unit_price: Money::from_cents(999),
                },
                OrderLine {
                    product_id: ProductId::new("SKU-002"),
                    product_name: "Gadget".to_string(),
                    quantity: 1,
                    unit_price: Money::from_cents(10),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_happy_path() {
        let f = fixture();

        let outcome = f
            .coordinator
            .create_order_and_delivery(request())
            .await
            .unwrap();

        assert!(outcome.delivery_id.is_some());
        assert_eq!(outcome.checkout_url.as_deref(), Some("https://pay/session-0001"));

        let order = f.store.get(outcome.order_id).await.unwrap().unwrap();
        assert_eq!(order.status, crate::OrderStatus::Created);
        assert_eq!(order.internal_status, InternalOrderStatus::None);
        assert_eq!(order.items.len(), 2);

        assert_eq!(f.bus.count_of("OrderCreated"), 1);
        assert_eq!(f.bus.count_of("OrderItemsReserved"), 1);
        assert_eq!(f.bus.total(), 2);
    }

    #[tokio::test]
    async fn test_delivery_failure_recorded_and_payment_still_attempted() {
        let f = fixture();
        f.deliveries.set_fail_on_create(true);

        let outcome = f
            .coordinator
            .create_order_and_delivery(request())
            .await
            .unwrap();

        assert!(outcome.delivery_id.is_none());
        // Payment is attempted even after delivery failed.
        assert_eq!(f.payments.session_attempts(), 1);
        assert!(outcome.checkout_url.is_some());

        let order = f.store.get(outcome.order_id).await.unwrap().unwrap();
        assert_eq!(order.internal_status, InternalOrderStatus::DeliveryFailed);

        // Creation events still fired exactly once each.
        assert_eq!(f.bus.count_of("OrderCreated"), 1);
        assert_eq!(f.bus.count_of("OrderItemsReserved"), 1);
    }

    #[tokio::test]
    async fn test_payment_failure_swallowed_without_recorded_status() {
        let f = fixture();
        f.payments.set_fail_on_session(true);

        let outcome = f
            .coordinator
            .create_order_and_delivery(request())
            .await
            .unwrap();

        assert!(outcome.delivery_id.is_some());
        assert!(outcome.checkout_url.is_none());

        // Unlike a delivery failure, nothing is recorded on the order.
        let order = f.store.get(outcome.order_id).await.unwrap().unwrap();
        assert_eq!(order.internal_status, InternalOrderStatus::None);
    }

    #[tokio::test]
    async fn test_payment_absent_url_leaves_field_empty() {
        let f = fixture();
        f.payments.set_absent_on_session(true);

        let outcome = f
            .coordinator
            .create_order_and_delivery(request())
            .await
            .unwrap();

        assert!(outcome.delivery_id.is_some());
        assert!(outcome.checkout_url.is_none());
        assert_eq!(f.payments.session_attempts(), 1);
    }

    #[tokio::test]
    async fn test_both_failures_leave_order_id_only() {
        let f = fixture();
        f.deliveries.set_fail_on_create(true);
        f.payments.set_fail_on_session(true);

        let outcome = f
            .coordinator
            .create_order_and_delivery(request())
            .await
            .unwrap();

        assert!(outcome.delivery_id.is_none());
        assert!(outcome.checkout_url.is_none());
        assert_eq!(f.store.count(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let f = fixture();
        f.store.set_fail_on_save(true);

        let result = f.coordinator.create_order_and_delivery(request()).await;
        assert!(matches!(result, Err(OrderServiceError::Store(_))));

        // Nothing persisted, nothing published, no downstream calls.
        assert_eq!(f.bus.total(), 0);
        assert_eq!(f.deliveries.create_attempts(), 0);
        assert_eq!(f.payments.session_attempts(), 0);
    }

    #[tokio::test]
    async fn test_publish_failure_does_not_abort_fulfillment() {
        let f = fixture();
        f.bus.set_fail_on_publish(true);

        let outcome = f
            .coordinator
            .create_order_and_delivery(request())
            .await
            .unwrap();

        assert!(outcome.delivery_id.is_some());
        assert!(outcome.checkout_url.is_some());
        assert_eq!(f.bus.total(), 0);
    }
}
