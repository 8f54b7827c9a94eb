//! Compose a draft order against the console API and print it
//!
//! ```text
//! order-composer [--subscription ID] [--one-off] PRODUCT:QTY[@PRICE_LIST][#NOTES] ...
//! ```

use anyhow::{Context, bail};
use order_composer::gateway::HttpGateway;
use order_composer::{AddArticle, Config, DraftOrderSession, Gateways, init_logger_with_file};
use serde_json::json;
use shared::OrderKind;
use std::sync::Arc;

struct Args {
    subscription_id: Option<i64>,
    kind: OrderKind,
    articles: Vec<AddArticle>,
}

fn parse_article(raw: &str) -> anyhow::Result<AddArticle> {
    let (raw, notes) = match raw.split_once('#') {
        Some((head, notes)) => (head, Some(notes.to_string())),
        None => (raw, None),
    };
    let (raw, price_list_id) = match raw.split_once('@') {
        Some((head, pl)) => (
            head,
            Some(pl.parse::<i64>().with_context(|| format!("bad price list '{}'", pl))?),
        ),
        None => (raw, None),
    };
    let Some((product, quantity)) = raw.split_once(':') else {
        bail!("expected PRODUCT:QTY, got '{}'", raw);
    };

    Ok(AddArticle {
        product_id: Some(
            product
                .parse()
                .with_context(|| format!("bad product id '{}'", product))?,
        ),
        quantity: quantity
            .parse()
            .with_context(|| format!("bad quantity '{}'", quantity))?,
        price_list_id,
        notes,
    })
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        subscription_id: None,
        kind: OrderKind::Subscription,
        articles: Vec::new(),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--subscription" => {
                let value = iter.next().context("--subscription needs an id")?;
                args.subscription_id = Some(value.parse().context("bad subscription id")?);
            }
            "--one-off" => args.kind = OrderKind::OneOff,
            other => args.articles.push(parse_article(other)?),
        }
    }

    if args.articles.is_empty() {
        bail!(
            "usage: order-composer [--subscription ID] [--one-off] PRODUCT:QTY[@PRICE_LIST][#NOTES] ..."
        );
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let args = parse_args()?;
    tracing::info!(api_url = %config.api_url, environment = %config.environment, "Order composer starting");

    let gateway = HttpGateway::from_config(&config)?;
    let mut session = DraftOrderSession::from_config(&config, Gateways::from_single(Arc::new(gateway)));
    session.set_kind(args.kind);

    let mut diagnostics = Vec::new();
    if args.subscription_id.is_some() {
        diagnostics.extend(session.select_subscription(args.subscription_id).await);
    }

    for article in args.articles {
        match session.add_article(article).await {
            Ok(outcome) => diagnostics.extend(outcome.diagnostics),
            Err(e) => tracing::error!(error = %e, code = %e.code(), "Article rejected"),
        }
    }

    session.audit()?;

    let report = json!({
        "header": session.header(),
        "lines": session.lines(),
        "items": session.submission_items(),
        "legend": session.legend(),
        "diagnostics": diagnostics,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
