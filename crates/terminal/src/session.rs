//! Checkout coordinator: sequences backend requests against the session state.

use chrono::Utc;

use crate::api::{CatalogService, SalesService};
use crate::commands::Command;
use crate::error::PosError;
use crate::state::{Notice, PosState};

/// The state after handling one operator action, plus what to tell them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: PosState,
    pub notices: Vec<Notice>,
}

impl Transition {
    pub fn quiet(state: PosState) -> Self {
        Self {
            state,
            notices: Vec::new(),
        }
    }

    pub fn with_notice(state: PosState, notice: Notice) -> Self {
        Self {
            state,
            notices: vec![notice],
        }
    }

    /// The action was refused; `state` is the state the action started from.
    pub fn refused(state: PosState, err: PosError) -> Self {
        tracing::debug!(error = %err, "action refused");
        Self::with_notice(state, Notice::from(&err))
    }
}

pub struct Coordinator<C, S> {
    catalog: C,
    sales: S,
}

impl<C, S> Coordinator<C, S>
where
    C: CatalogService,
    S: SalesService,
{
    pub fn new(catalog: C, sales: S) -> Self {
        Self { catalog, sales }
    }

    /// First catalog fetch at start-up. Failures are logged only; the list stays empty.
    pub async fn initial_load(&self, state: PosState) -> PosState {
        let Ok(loading) = state.begin_refresh() else {
            return state;
        };
        match self.catalog.list_products().await {
            Ok(products) => {
                tracing::info!(count = products.len(), "catalog loaded");
                loading.finish_refresh(Some(products), Utc::now())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load catalog");
                loading.finish_refresh(None, Utc::now())
            }
        }
    }

    /// Re-fetch the product list on request.
    pub async fn refresh(&self, state: PosState) -> Transition {
        let loading = match state.begin_refresh() {
            Ok(next) => next,
            Err(e) => return Transition::refused(state, e),
        };

        match self.catalog.list_products().await {
            Ok(products) => {
                tracing::info!(count = products.len(), "catalog refreshed");
                Transition::quiet(loading.finish_refresh(Some(products), Utc::now()))
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog refresh failed");
                Transition::with_notice(
                    loading.finish_refresh(None, Utc::now()),
                    Notice::error(e.user_message("Error loading products")),
                )
            }
        }
    }

    /// Create the product described by the form.
    pub async fn add_product(&self, state: PosState) -> Transition {
        let (pending, new_product) = match state.begin_add_product() {
            Ok(next) => next,
            Err(e) => return Transition::refused(state, e),
        };

        match self.catalog.create_product(&new_product).await {
            Ok(product) => {
                tracing::info!(id = %product.id, name = %product.name, "product created");
                let notice = Notice::info(format!("Added {}", product.name));
                Transition::with_notice(pending.complete_add_product(product), notice)
            }
            Err(e) => {
                tracing::warn!(error = %e, "product creation failed");
                Transition::with_notice(
                    pending.abort_request(),
                    Notice::error(e.user_message("Error adding product")),
                )
            }
        }
    }

    /// Submit the cart as a sale, then re-fetch the catalog for updated stock.
    ///
    /// On failure the cart is left exactly as it was.
    pub async fn checkout(&self, state: PosState) -> Transition {
        let (submitting, sale) = match state.begin_checkout() {
            Ok(next) => next,
            Err(e) => return Transition::refused(state, e),
        };

        if let Err(e) = self.sales.submit_sale(&sale).await {
            tracing::warn!(error = %e, "sale rejected");
            return Transition::with_notice(
                submitting.abort_request(),
                Notice::error(e.user_message("Error processing sale")),
            );
        }

        tracing::info!(
            lines = sale.items.len(),
            units = sale.unit_count(),
            "sale recorded"
        );
        let sold = submitting.complete_sale();
        let mut notices = vec![Notice::info("Sale recorded!")];

        let state = match self.catalog.list_products().await {
            Ok(products) => sold.finish_refresh(Some(products), Utc::now()),
            Err(e) => {
                tracing::warn!(error = %e, "catalog refresh after sale failed");
                notices.push(Notice::warning(
                    "Sale recorded, but the product list could not be refreshed; stock shown may be out of date",
                ));
                sold.finish_refresh(None, Utc::now())
            }
        };

        Transition { state, notices }
    }

    /// Apply one operator command.
    pub async fn dispatch(&self, state: PosState, command: Command) -> Transition {
        match command {
            Command::Refresh => self.refresh(state).await,
            Command::SetField(field, value) => Transition::quiet(state.with_form_field(field, value)),
            Command::Save => self.add_product(state).await,
            Command::Add(selector) => match state.add_to_cart(&selector) {
                Ok(next) => Transition::quiet(next),
                Err(e) => Transition::refused(state, e),
            },
            Command::Checkout => self.checkout(state).await,
            Command::List | Command::Cart | Command::Help | Command::Quit => Transition::quiet(state),
        }
    }
}
