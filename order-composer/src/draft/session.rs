use super::{AddArticle, AddOutcome, DraftError, DraftSettings, LineStore};
use crate::allocator::{Allocation, allocate};
use crate::core::Config;
use crate::gateway::{Gateways, LookupDiagnostic, LookupKind};
use crate::ledger::CreditLedgerView;
use crate::legend::format_legend;
use crate::order_money::apply_totals;
use crate::pricing::PriceResolver;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::order::{DraftOrderHeader, OrderKind, OrderLine, SubmissionItem};
use shared::ProductInfo;
use std::collections::HashSet;
use tracing::{debug, error, info};

/// A draft order being composed
///
/// Operations run to completion one at a time (`&mut self`). Within
/// [`add_article`](Self::add_article) the ledger read, the ledger decrement
/// and the COVERED line append happen with no await between them.
pub struct DraftOrderSession {
    gateways: Gateways,
    settings: DraftSettings,
    header: DraftOrderHeader,
    ledger: CreditLedgerView,
    lines: LineStore,
    prices: PriceResolver,
}

impl DraftOrderSession {
    pub fn new(gateways: Gateways, settings: DraftSettings) -> Self {
        let prices = PriceResolver::new(gateways.prices.clone(), settings.default_price_list_id);
        Self {
            gateways,
            settings,
            header: DraftOrderHeader::default(),
            ledger: CreditLedgerView::new(),
            lines: LineStore::new(),
            prices,
        }
    }

    pub fn from_config(config: &Config, gateways: Gateways) -> Self {
        Self::new(gateways, DraftSettings::from_config(config))
    }

    // ========== Accessors ==========

    pub fn header(&self) -> &DraftOrderHeader {
        &self.header
    }

    pub fn lines(&self) -> &[OrderLine] {
        self.lines.lines()
    }

    pub fn total_amount(&self) -> Decimal {
        self.header.total_amount
    }

    pub fn ledger(&self) -> &CreditLedgerView {
        &self.ledger
    }

    pub fn settings(&self) -> &DraftSettings {
        &self.settings
    }

    /// Remaining-credit text for the UI
    ///
    /// `None` while the order cannot draw from credits (one-off orders).
    pub fn legend(&self) -> Option<String> {
        if !self.entitlement_active() {
            return None;
        }
        format_legend(&self.ledger)
    }

    /// Whether adds currently draw from credits
    pub fn entitlement_active(&self) -> bool {
        self.entitled_subscription().is_some()
    }

    fn entitled_subscription(&self) -> Option<i64> {
        self.ledger
            .subscription_id()
            .filter(|_| self.header.kind.permits_entitlement())
    }

    // ========== Header ==========

    /// Switch (or clear) the active subscription
    ///
    /// The ledger is reloaded from scratch. Existing lines stay as they are;
    /// COVERED lines from the previous load no longer restore credit.
    pub async fn select_subscription(
        &mut self,
        subscription_id: Option<i64>,
    ) -> Option<LookupDiagnostic> {
        info!(
            from = ?self.header.subscription_id,
            to = ?subscription_id,
            lines = self.lines.len(),
            "Switching subscription"
        );
        self.header.subscription_id = subscription_id;
        match subscription_id {
            Some(id) => {
                self.ledger
                    .load(self.gateways.subscriptions.as_ref(), id)
                    .await
            }
            None => {
                self.ledger.clear();
                None
            }
        }
    }

    pub fn set_kind(&mut self, kind: OrderKind) {
        debug!(?kind, "Order kind set");
        self.header.kind = kind;
    }

    pub fn set_customer(&mut self, customer_id: Option<i64>) {
        self.header.customer_id = customer_id;
    }

    pub fn set_delivery_date(&mut self, delivery_date: Option<NaiveDate>) {
        self.header.delivery_date = delivery_date;
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.header.notes = notes;
    }

    pub fn set_allows_partial_payment(&mut self, allows: bool) {
        self.header.allows_partial_payment = allows;
        self.recompute_totals();
    }

    /// Record a payment amount; ignored unless partial payment is allowed
    pub fn set_paid_amount(&mut self, amount: Decimal) {
        if self.header.allows_partial_payment {
            self.header.paid_amount = amount;
        }
    }

    // ========== Lines ==========

    /// Split a request into COVERED and PRICED lines and append them
    ///
    /// Lookup failures never reject the request; they come back in
    /// [`AddOutcome::diagnostics`].
    pub async fn add_article(&mut self, request: AddArticle) -> Result<AddOutcome, DraftError> {
        let product_id = self.validate(&request)?;
        let mut diagnostics = Vec::new();

        let product = self.enrich(product_id, &mut diagnostics).await;

        let mut appended = Vec::with_capacity(2);
        let allocation = match self.entitled_subscription() {
            Some(subscription_id) => {
                let allocation = allocate(&self.ledger, product_id, request.quantity);
                if allocation.covered > 0 {
                    self.ledger.apply(product_id, -allocation.covered);
                    let line = OrderLine::covered(
                        self.lines.next_id(),
                        &product,
                        allocation.covered,
                        subscription_id,
                        request.notes.clone(),
                    );
                    self.lines.push_covered(line.clone(), self.ledger.generation());
                    appended.push(line);
                }
                allocation
            }
            None => Allocation::priced(request.quantity),
        };

        if allocation.extra > 0 {
            let quote = self
                .prices
                .quote(product_id, request.price_list_id, allocation.extra)
                .await;
            let line = OrderLine::priced(
                self.lines.next_id(),
                &product,
                allocation.extra,
                quote.price_list_id,
                quote.unit_price,
                quote.extended_price,
                request.notes.clone(),
            );
            self.lines.push(line.clone());
            appended.push(line);
            diagnostics.extend(quote.diagnostic);
        }

        self.recompute_totals();
        info!(
            product_id,
            requested = request.quantity,
            covered = allocation.covered,
            extra = allocation.extra,
            total = %self.header.total_amount,
            "Article added"
        );

        Ok(AddOutcome {
            lines: appended,
            allocation,
            diagnostics,
        })
    }

    /// Remove a line by id, restoring credit for COVERED lines
    ///
    /// Unknown ids are a no-op and return `None`.
    pub fn remove_article(&mut self, line_id: i64) -> Option<OrderLine> {
        let Some((line, generation)) = self.lines.remove(line_id) else {
            debug!(line_id, "Remove of unknown line ignored");
            return None;
        };

        if line.is_covered() {
            if generation == Some(self.ledger.generation()) {
                self.ledger.apply(line.product_id, line.quantity);
            } else {
                debug!(
                    line_id,
                    product_id = line.product_id,
                    "Covered line from an earlier ledger load, credit not restored"
                );
            }
        }

        self.recompute_totals();
        info!(
            line_id,
            product_id = line.product_id,
            quantity = line.quantity,
            source = ?line.source,
            total = %self.header.total_amount,
            "Article removed"
        );
        Some(line)
    }

    /// Remove the first line equal on (product, quantity, price list, notes)
    pub fn remove_matching(
        &mut self,
        product_id: i64,
        quantity: i32,
        price_list_id: Option<i64>,
        notes: Option<&str>,
    ) -> Option<OrderLine> {
        let line_id = self
            .lines
            .find_matching(product_id, quantity, price_list_id, notes)?;
        self.remove_article(line_id)
    }

    /// Order-creation payload in line order
    pub fn submission_items(&self) -> Vec<SubmissionItem> {
        self.lines.lines().iter().map(SubmissionItem::from).collect()
    }

    /// Check credit conservation against the loaded snapshot
    ///
    /// For every product: loaded - remaining == covered quantity present
    /// from the current load, and remaining >= 0.
    pub fn audit(&self) -> Result<(), DraftError> {
        let generation = self.ledger.generation();
        let covered = self.lines.covered_by_product(generation);

        let products: HashSet<i64> = self
            .ledger
            .entries()
            .iter()
            .map(|e| e.product_id)
            .chain(covered.keys().copied())
            .collect();

        for product_id in products {
            let original = self.ledger.original(product_id);
            let remaining = self.ledger.get(product_id);
            let used = covered.get(&product_id).copied().unwrap_or(0);
            if remaining < 0 || original - remaining != used {
                error!(
                    product_id,
                    original,
                    remaining,
                    covered = used,
                    generation,
                    "Credit ledger drift"
                );
                return Err(DraftError::LedgerDrift {
                    product_id,
                    original,
                    remaining,
                    covered: used,
                });
            }
        }
        Ok(())
    }

    /// Abandon the draft: drop lines, restore loaded balances
    pub fn reset(&mut self) {
        info!(lines = self.lines.len(), "Draft reset");
        self.lines.clear();
        self.ledger.restore_original();
        self.header.paid_amount = Decimal::ZERO;
        self.recompute_totals();
    }

    /// Forget cached prices (price lists edited elsewhere)
    pub fn invalidate_prices(&mut self) {
        self.prices.invalidate();
    }

    // ========== Internals ==========

    fn validate(&self, request: &AddArticle) -> Result<i64, DraftError> {
        let Some(product_id) = request.product_id else {
            return Err(DraftError::ProductRequired);
        };
        if request.quantity <= 0 {
            return Err(DraftError::InvalidQuantity(request.quantity));
        }
        if request.quantity > self.settings.max_line_quantity {
            return Err(DraftError::QuantityTooLarge {
                quantity: request.quantity,
                max: self.settings.max_line_quantity,
            });
        }
        Ok(product_id)
    }

    async fn enrich(
        &self,
        product_id: i64,
        diagnostics: &mut Vec<LookupDiagnostic>,
    ) -> ProductInfo {
        match self.gateways.products.product(product_id).await {
            Ok(product) => ProductInfo {
                id: product_id,
                ..product
            },
            Err(e) => {
                let diagnostic =
                    LookupDiagnostic::from_error(LookupKind::Product, Some(product_id), &e);
                diagnostic.log();
                diagnostics.push(diagnostic);
                ProductInfo::unknown(product_id)
            }
        }
    }

    fn recompute_totals(&mut self) {
        apply_totals(&mut self.header, self.lines.lines());
    }
}
