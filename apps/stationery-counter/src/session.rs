//! # Counter Session
//!
//! One customer, one order, start to finish.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Init ──► Registering ──► Collecting ──► Flushing ──► Summarizing     │
//! │                              │    ▲                         │          │
//! │                              └────┘                         ▼          │
//! │                     add / -1 remove / -2 reduce            Done        │
//! │                                                                         │
//! │   Collecting leaves on the sentinel 0.                                  │
//! │   Any storage fault or closed input aborts from any state.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is written to the orders table before `Flushing`; every edit in
//! `Collecting` only touches the in-memory [`Order`].

use std::io::{BufRead, Write};

use tracing::{debug, info};

use stationery_core::validation::validate_customer_name;
use stationery_core::{CoreError, Customer, Order, OrderSummary, Product, Reduction, ValidationError};

use crate::console::{Console, IntToken};
use crate::error::SessionResult;
use crate::gateway::{Catalog, OrderGateway};

// =============================================================================
// Console text
// =============================================================================

const CONNECTED: &str = "Connected to database successfully!";
const AVAILABLE_PRODUCTS: &str = "Available products:";
const ENTER_NAME: &str = "Enter customer name: ";
const INVALID_NAME: &str = "Invalid name. Please use letters and spaces only.";
const SELECT_PRODUCT: &str = "Select a product by ID (or type 0 to finish, -1 to remove an item): ";
const SELECT_PRODUCT_WITH_REDUCE: &str =
    "Select a product by ID (or type 0 to finish, -1 to remove an item, -2 to reduce quantity): ";
const INVALID_INPUT: &str = "Invalid input, please enter a number.";
const INVALID_PRODUCT: &str = "Invalid choice, please select a valid product.";
const ENTER_QUANTITY: &str = "Enter quantity: ";
const ENTER_QUANTITY_STRICT: &str = "Enter quantity (must be greater than zero): ";
const QUANTITY_NOT_POSITIVE: &str = "Quantity must be greater than zero.";
const QUANTITY_TOO_LARGE: &str = "Quantity is too large.";
const NOTHING_TO_REMOVE: &str = "No items in the order to remove.";
const NOTHING_TO_REDUCE: &str = "No items in the order to reduce.";
const CURRENT_ITEMS: &str = "Current items in your order:";
const SELECT_REMOVE: &str = "Select the item number to remove: ";
const SELECT_REDUCE: &str = "Select the item number to reduce quantity: ";
const ENTER_REDUCE_AMOUNT: &str = "Enter quantity to reduce: ";
const ITEM_REMOVED: &str = "Item removed from the order.";
const QUANTITY_REDUCED: &str = "Quantity reduced.";
const INVALID_ITEM: &str = "Invalid item number.";
const INVALID_REDUCE_AMOUNT: &str = "Invalid quantity to reduce.";
const ORDER_SUMMARY: &str = "Order Summary:";

/// Sentinel selections in `Collecting`.
const FINISH: i64 = 0;
const REMOVE: i64 = -1;
const REDUCE: i64 = -2;

// =============================================================================
// Features
// =============================================================================

/// Behavior switches for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFeatures {
    /// Re-prompt until the name is letters and spaces only.
    pub validate_names: bool,
    /// Offer `-2` to reduce a line item's quantity.
    pub allow_reduce: bool,
    /// Spell out the positive-quantity rule in the quantity prompt.
    pub strict_quantity_prompt: bool,
}

impl SessionFeatures {
    /// Plain counter: any name, remove only.
    pub const fn simple() -> Self {
        SessionFeatures {
            validate_names: false,
            allow_reduce: false,
            strict_quantity_prompt: false,
        }
    }

    /// Validated names, reduce, explicit quantity rule.
    pub const fn strict() -> Self {
        SessionFeatures {
            validate_names: true,
            allow_reduce: true,
            strict_quantity_prompt: true,
        }
    }
}

impl Default for SessionFeatures {
    fn default() -> Self {
        Self::strict()
    }
}

// =============================================================================
// Session
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Init,
    Registering,
    Collecting,
    Flushing,
    Summarizing,
    Done,
}

/// What one `Collecting` step decided.
enum Step {
    Continue,
    Finish,
}

pub struct Session<'a, R, W> {
    console: Console<R, W>,
    catalog: &'a dyn Catalog,
    gateway: &'a dyn OrderGateway,
    features: SessionFeatures,
    currency: String,
    state: SessionState,
    customer: Option<Customer>,
    order: Order,
    summary: OrderSummary,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        console: Console<R, W>,
        catalog: &'a dyn Catalog,
        gateway: &'a dyn OrderGateway,
        features: SessionFeatures,
    ) -> Self {
        Session {
            console,
            catalog,
            gateway,
            features,
            currency: stationery_core::DEFAULT_CURRENCY_LABEL.to_string(),
            state: SessionState::Init,
            customer: None,
            order: Order::new(),
            summary: OrderSummary::default(),
        }
    }

    /// Overrides the currency label printed in front of amounts.
    pub fn currency(mut self, label: impl Into<String>) -> Self {
        self.currency = label.into();
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The in-memory order as collected so far.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Hands back the console, e.g. to inspect captured output.
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Drives the session until `Done` and returns the printed summary.
    pub async fn run(&mut self) -> SessionResult<OrderSummary> {
        while self.state != SessionState::Done {
            self.state = self.advance().await?;
            debug!(state = ?self.state, "Session state");
        }

        Ok(self.summary.clone())
    }

    async fn advance(&mut self) -> SessionResult<SessionState> {
        let next = match self.state {
            SessionState::Init => {
                self.show_catalog().await?;
                SessionState::Registering
            }
            SessionState::Registering => {
                self.register().await?;
                SessionState::Collecting
            }
            SessionState::Collecting => match self.collect_one().await? {
                Step::Continue => SessionState::Collecting,
                Step::Finish => SessionState::Flushing,
            },
            SessionState::Flushing => {
                self.flush().await?;
                SessionState::Summarizing
            }
            SessionState::Summarizing => {
                self.summarize().await?;
                SessionState::Done
            }
            SessionState::Done => SessionState::Done,
        };

        Ok(next)
    }

    // -------------------------------------------------------------------------
    // Init / Registering
    // -------------------------------------------------------------------------

    async fn show_catalog(&mut self) -> SessionResult<()> {
        self.console.say(CONNECTED)?;

        let products = self.catalog.list().await?;
        self.console.say(AVAILABLE_PRODUCTS)?;
        for product in &products {
            self.console.say(product.listing(&self.currency))?;
        }

        Ok(())
    }

    async fn register(&mut self) -> SessionResult<()> {
        let name = loop {
            self.console.prompt(ENTER_NAME)?;
            let name = self.console.next_line()?.trim().to_string();

            if !self.features.validate_names {
                break name;
            }

            match validate_customer_name(&name) {
                Ok(()) => break name,
                Err(err) => {
                    debug!(error = %err, "Rejected customer name");
                    self.console.say(INVALID_NAME)?;
                }
            }
        };

        let id = self.gateway.register_customer(&name).await?;
        info!(customer_id = id, "Customer registered");

        self.console
            .say(format!("Customer {name} inserted successfully."))?;
        self.customer = Some(Customer { id, name });
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Collecting
    // -------------------------------------------------------------------------

    async fn collect_one(&mut self) -> SessionResult<Step> {
        let prompt = if self.features.allow_reduce {
            SELECT_PRODUCT_WITH_REDUCE
        } else {
            SELECT_PRODUCT
        };
        self.console.prompt(prompt)?;

        let selection = match self.console.next_int()? {
            IntToken::Value(value) => value,
            IntToken::Invalid(_) => {
                self.console.say(INVALID_INPUT)?;
                return Ok(Step::Continue);
            }
        };

        match selection {
            FINISH => return Ok(Step::Finish),
            REMOVE => self.remove_item()?,
            REDUCE if self.features.allow_reduce => self.reduce_item()?,
            product_id => self.add_product(product_id).await?,
        }

        Ok(Step::Continue)
    }

    async fn add_product(&mut self, product_id: i64) -> SessionResult<()> {
        let Some(product) = self.lookup(product_id).await? else {
            self.console.say(INVALID_PRODUCT)?;
            return Ok(());
        };

        let prompt = if self.features.strict_quantity_prompt {
            ENTER_QUANTITY_STRICT
        } else {
            ENTER_QUANTITY
        };
        self.console.prompt(prompt)?;

        let quantity = match self.console.next_int()? {
            IntToken::Value(value) => value,
            IntToken::Invalid(_) => {
                self.console.say(INVALID_INPUT)?;
                return Ok(());
            }
        };

        match self.order.add(product, quantity) {
            Ok(item) => {
                let line = format!("Added {} x {} to your order.", item.quantity, item.product.name);
                self.console.say(line)?;
            }
            Err(err) => {
                debug!(error = %err, quantity, "Add rejected");
                let message = match err {
                    CoreError::Validation(ValidationError::MustBePositive { .. }) => {
                        QUANTITY_NOT_POSITIVE
                    }
                    _ => QUANTITY_TOO_LARGE,
                };
                self.console.say(message)?;
            }
        }

        Ok(())
    }

    /// `exists` first, then `get`; a vanished row counts as invalid.
    async fn lookup(&self, product_id: i64) -> SessionResult<Option<Product>> {
        if !self.catalog.exists(product_id).await? {
            return Ok(None);
        }

        Ok(self.catalog.get(product_id).await?)
    }

    fn remove_item(&mut self) -> SessionResult<()> {
        if self.order.is_empty() {
            self.console.say(NOTHING_TO_REMOVE)?;
            return Ok(());
        }

        self.list_items()?;
        self.console.prompt(SELECT_REMOVE)?;

        let position = match self.console.next_int()? {
            IntToken::Value(value) => value,
            IntToken::Invalid(_) => {
                self.console.say(INVALID_INPUT)?;
                return Ok(());
            }
        };

        match self.order.remove_at(position) {
            Ok(item) => {
                debug!(product_id = item.product_id(), "Line item removed");
                self.console.say(ITEM_REMOVED)?;
            }
            Err(_) => self.console.say(INVALID_ITEM)?,
        }

        Ok(())
    }

    fn reduce_item(&mut self) -> SessionResult<()> {
        if self.order.is_empty() {
            self.console.say(NOTHING_TO_REDUCE)?;
            return Ok(());
        }

        self.list_items()?;
        self.console.prompt(SELECT_REDUCE)?;

        let position = match self.console.next_int()? {
            IntToken::Value(value) => value,
            IntToken::Invalid(_) => {
                self.console.say(INVALID_INPUT)?;
                return Ok(());
            }
        };

        if position < 1 || position > self.order.len() as i64 {
            self.console.say(INVALID_ITEM)?;
            return Ok(());
        }

        self.console.prompt(ENTER_REDUCE_AMOUNT)?;
        let amount = match self.console.next_int()? {
            IntToken::Value(value) => value,
            IntToken::Invalid(_) => {
                self.console.say(INVALID_INPUT)?;
                return Ok(());
            }
        };

        let message = match self.order.reduce_at(position, amount) {
            Ok(Reduction::Reduced { .. }) => QUANTITY_REDUCED,
            Ok(Reduction::Removed(_)) => ITEM_REMOVED,
            Err(CoreError::InvalidReduceAmount { .. }) => INVALID_REDUCE_AMOUNT,
            Err(_) => INVALID_ITEM,
        };
        self.console.say(message)?;

        Ok(())
    }

    fn list_items(&mut self) -> SessionResult<()> {
        self.console.say(CURRENT_ITEMS)?;
        for (index, item) in self.order.items().iter().enumerate() {
            let line = format!("{}. {}", index + 1, item.render(&self.currency));
            self.console.say(line)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Flushing / Summarizing
    // -------------------------------------------------------------------------

    fn customer_id(&self) -> i64 {
        // Registering always runs before Flushing
        self.customer.as_ref().map(|c| c.id).unwrap_or_default()
    }

    async fn flush(&mut self) -> SessionResult<()> {
        let customer_id = self.customer_id();
        let written = self
            .gateway
            .record_order_items(customer_id, self.order.items())
            .await?;

        info!(customer_id, rows = written, total = %self.order.total(), "Order flushed");
        Ok(())
    }

    async fn summarize(&mut self) -> SessionResult<()> {
        let lines = self.gateway.fetch_summary(self.customer_id()).await?;
        let summary = OrderSummary::from_lines(lines);

        self.console.say(ORDER_SUMMARY)?;
        for line in &summary.lines {
            self.console.say(line.render(&self.currency))?;
        }
        self.console.say(format!(
            "Total Amount: {}",
            summary.total.labelled(&self.currency)
        ))?;

        self.summary = summary;
        Ok(())
    }
}
