//! Checkout orchestration.

use common::{Address, CourierId, ProductId, Recipient, RpcError, StoreError, UserId};
use thiserror::Error;

use crate::cart::Cart;
use crate::fulfillment::{FulfillmentClient, OrderPayload, PayloadLine};
use crate::stock::StockChecker;
use crate::store::CartStore;

/// Structural checkout failures.
///
/// Business rejections (insufficient stock) do NOT travel this channel;
/// they come back as a successful [`CheckoutResult`] with `success =
/// false`. The first four variants map to the HTTP layer's error
/// responses; the last two are genuinely unexpected faults.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The user has no cart, or the cart has no items. The two cases are
    /// indistinguishable on purpose: an empty cart is unusable for
    /// checkout either way.
    #[error("cart not found")]
    CartNotFound,

    /// The order was created but no delivery was provisioned.
    #[error("delivery was not created for the order")]
    DeliveryNotCreated,

    /// The order was created but neither a delivery nor a payment session
    /// was provisioned.
    #[error("neither delivery nor payment checkout was created for the order")]
    DeliveryAndPaymentCheckoutNotCreated,

    /// The order and delivery exist but no payment session was opened.
    #[error("payment checkout url was not created for the order")]
    PaymentCheckoutUrlNotCreated,

    /// Cart persistence failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A collaborator call failed at the transport level.
    #[error("rpc error: {0}")]
    Rpc(#[from] RpcError),
}

/// What the customer fills in at checkout.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Free-text note for the order.
    pub note: String,
    /// Courier requested for the delivery.
    pub courier_id: CourierId,
    /// Destination address.
    pub address: Address,
    /// Recipient contact details.
    pub recipient: Recipient,
}

/// Outcome of a well-formed, fully processed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutResult {
    /// True if an order was created and fully provisioned.
    pub success: bool,
    /// Products that blocked the checkout for lack of stock.
    pub bad_products: Vec<ProductId>,
    /// Payment URL for the customer to complete the purchase.
    pub checkout_url: Option<String>,
}

impl CheckoutResult {
    /// A checkout that produced a fully provisioned order.
    pub fn completed(checkout_url: impl Into<String>) -> Self {
        Self {
            success: true,
            bad_products: Vec::new(),
            checkout_url: Some(checkout_url.into()),
        }
    }

    /// A checkout rejected because some products are out of stock.
    pub fn rejected(bad_products: Vec<ProductId>) -> Self {
        Self {
            success: false,
            bad_products,
            checkout_url: None,
        }
    }
}

/// Orchestrates checkout: cart validation, stock gate, fulfillment call,
/// cart consumption, response classification.
///
/// Order creation is the point of no return for the cart: once the
/// fulfillment call returns, the cart is deleted even if the response then
/// classifies as a failure.
pub struct CheckoutService<C, K, F>
where
    C: CartStore,
    K: StockChecker,
    F: FulfillmentClient,
{
    carts: C,
    stock: K,
    fulfillment: F,
}

impl<C, K, F> CheckoutService<C, K, F>
where
    C: CartStore,
    K: StockChecker,
    F: FulfillmentClient,
{
    /// Creates a new checkout service.
    pub fn new(carts: C, stock: K, fulfillment: F) -> Self {
        Self {
            carts,
            stock,
            fulfillment,
        }
    }

    /// Converts a user's cart into an order, delivery and payment session.
    #[tracing::instrument(skip(self, request))]
    pub async fn checkout(
        &self,
        user_id: UserId,
        request: CheckoutRequest,
    ) -> Result<CheckoutResult, CheckoutError> {
        metrics::counter!("checkout_attempts_total").increment(1);
        let checkout_start = std::time::Instant::now();

        // 1. Load the cart; missing and empty collapse to the same error.
        let cart = self
            .carts
            .get_by_user(user_id)
            .await?
            .filter(|cart| !cart.is_empty())
            .ok_or(CheckoutError::CartNotFound)?;

        // 2. Stock gate. A non-empty unavailable list is a business
        //    rejection, not an error; the cart stays.
        let bad_products = self.stock.unavailable(&cart.line_quantities()).await?;
        if !bad_products.is_empty() {
            metrics::counter!("checkout_stock_rejections_total").increment(1);
            tracing::info!(%user_id, rejected = bad_products.len(), "checkout blocked by stock");
            return Ok(CheckoutResult::rejected(bad_products));
        }

        // 3. Hand the order payload to the order service.
        let reply = self
            .fulfillment
            .create_order_and_delivery(build_payload(&cart, &request))
            .await?;
        tracing::info!(%user_id, order_id = %reply.order_id, "order created from cart");

        // 4. An order now exists; the cart is consumed no matter how the
        //    response classifies below.
        self.carts.delete_by_user(user_id).await?;

        metrics::histogram!("checkout_duration_seconds")
            .record(checkout_start.elapsed().as_secs_f64());

        // 5. Classify. The combined failure takes precedence when both
        //    resources are absent.
        match (reply.delivery_id, reply.checkout_url) {
            (None, None) => Err(CheckoutError::DeliveryAndPaymentCheckoutNotCreated),
            (None, Some(_)) => Err(CheckoutError::DeliveryNotCreated),
            (Some(_), None) => Err(CheckoutError::PaymentCheckoutUrlNotCreated),
            (Some(_), Some(url)) => Ok(CheckoutResult::completed(url)),
        }
    }
}

fn build_payload(cart: &Cart, request: &CheckoutRequest) -> OrderPayload {
    OrderPayload {
        user_id: cart.user_id,
        total_price: cart.total_price(),
        note: request.note.clone(),
        courier_id: request.courier_id,
        address: request.address.clone(),
        recipient: request.recipient.clone(),
        items: cart
            .items
            .iter()
            .map(|item| PayloadLine {
                product_id: item.product_id.clone(),
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect(),
    }
}
