//! HTML rendering of the cart snapshot

use crate::cart::helpers::format_money;
use crate::cart::CartSnapshot;

/// Seconds between automatic page reloads
pub const REFRESH_SECONDS: u32 = 5;

/// Escapes text for embedding in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Renders the full cart page.
pub fn render_cart_page(snapshot: &CartSnapshot) -> String {
    let currency = escape_html(snapshot.currency);

    let rows = if snapshot.is_empty() {
        String::from(r#"<tr><td colspan="4" class="empty">Your cart is empty</td></tr>"#)
    } else {
        snapshot
            .items
            .iter()
            .map(|item| {
                format!(
                    "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
                    escape_html(&item.name),
                    format_money(item.unit_price),
                    item.quantity,
                    format_money(item.line_total),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta http-equiv="refresh" content="{refresh}">
<title>Pizza cart</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
table {{ border-collapse: collapse; min-width: 28rem; }}
th, td {{ border-bottom: 1px solid #ddd; padding: .4rem .8rem; text-align: left; }}
.num {{ text-align: right; }}
.empty {{ color: #888; font-style: italic; }}
tfoot td {{ font-weight: bold; }}
</style>
</head>
<body>
<h1>Pizza cart</h1>
<table>
<thead><tr><th>Pizza</th><th class="num">Unit price</th><th class="num">Qty</th><th class="num">Total</th></tr></thead>
<tbody>
{rows}
</tbody>
<tfoot><tr><td colspan="3">Subtotal</td><td class="num">{subtotal} {currency}</td></tr></tfoot>
</table>
</body>
</html>
"#,
        refresh = REFRESH_SECONDS,
        rows = rows,
        subtotal = format_money(snapshot.subtotal),
        currency = currency,
    )
}
