//! Plain-text rendering of the session.

use tsmpos_products::ProductForm;
use tsmpos_sales::CartLedger;

use crate::state::{Notice, NoticeLevel, PosState};

pub const TITLE: &str = "TSM POS & Stock";

pub fn render_form(form: &ProductForm) -> String {
    format!(
        "Add Product\n  name:  {}\n  price: {}\n  stock: {}\n",
        form.name, form.price, form.stock
    )
}

pub fn render_products(state: &PosState) -> String {
    let mut out = String::from("Products");
    if let Some(at) = state.catalog_refreshed_at() {
        out.push_str(&format!(" (as of {} UTC)", at.format("%H:%M:%S")));
    }
    out.push('\n');

    if state.products().is_empty() {
        out.push_str("  (no products)\n");
    }
    for (idx, p) in state.products().iter().enumerate() {
        out.push_str(&format!(
            "  {}. {} - ${} - Stock: {}  [{}]\n",
            idx + 1,
            p.name,
            p.price,
            p.stock,
            p.id
        ));
    }
    out
}

pub fn render_cart(cart: &CartLedger) -> String {
    let mut out = String::from("Cart\n");
    if cart.is_empty() {
        out.push_str("  (empty)\n");
    }
    for line in cart.lines() {
        out.push_str(&format!(
            "  {} x {} = ${}\n",
            line.product.name,
            line.quantity,
            line.line_total()
        ));
    }
    out.push_str(&format!("Total: ${}\n", cart.total()));
    out
}

pub fn render_notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Info => "ok",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}

/// All panels, top to bottom.
pub fn render(state: &PosState) -> String {
    let mut out = format!("== {TITLE} ==\n");
    out.push_str(&render_form(state.form()));
    out.push('\n');
    out.push_str(&render_products(state));
    out.push('\n');
    out.push_str(&render_cart(state.cart()));
    if state.is_busy() {
        out.push_str("(working...)\n");
    }
    out
}
