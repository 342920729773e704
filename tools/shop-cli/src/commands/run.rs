//! Replay a scripted shopping session.

use std::collections::BTreeSet;

use anyhow::{anyhow, bail, Context as _, Result};
use dialoguer::Confirm;
use storefront_commerce::cart::AddOutcome;
use storefront_commerce::checkout::{CardDetails, Credentials, PaymentMethod};
use storefront_commerce::{OrderId, StorefrontStore};
use tracing::{info, warn};

use super::RunArgs;
use crate::context::Context;
use crate::script::{CheckoutInput, LoginInput, SessionScript, Step};

/// Run the session command.
pub async fn run(args: RunArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.script);
    let script = SessionScript::load(&path)?;
    let mut store = ctx.store();

    ctx.output.header(script.name.as_deref().unwrap_or("Shopping session"));
    if let Some(config_path) = &ctx.config_path {
        ctx.output.debug(&format!("Config: {}", config_path.display()));
    }

    let total = script.steps.len();
    info!(script = %path.display(), steps = total, "session started");
    let mut failed = 0;
    for (i, step) in script.steps.iter().enumerate() {
        ctx.output.step(i + 1, total, &step.describe());
        let result = execute(&mut store, step, ctx, args.yes)
            .await
            .with_context(|| format!("Step {} failed", i + 1));

        if let Err(e) = result {
            if !args.keep_going {
                return Err(e);
            }
            failed += 1;
            warn!(step = i + 1, error = %format!("{:#}", e), "step failed");
            ctx.output.warn(&format!("{:#}", e));
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "cart": store.cart().items(),
            "selected": store.selection().selected_keys(),
            "orders": store.list_orders(),
            "failed_steps": failed,
        }));
    } else if failed > 0 {
        ctx.output.warn(&format!("{} of {} step(s) failed", failed, total));
    } else {
        ctx.output.success(&format!("Session finished ({} step(s))", total));
    }

    Ok(())
}

async fn execute(store: &mut StorefrontStore, step: &Step, ctx: &Context, yes: bool) -> Result<()> {
    match step {
        Step::Add { item } => {
            let line = item.to_line_item(store)?;
            let key = line.key();
            match store.add_to_cart(line)? {
                AddOutcome::Added => ctx.output.success(&format!("Added {}", key)),
                AddOutcome::Merged => ctx.output.success(&format!("Merged into {}", key)),
            }
        }
        Step::AddMany { items } => {
            let lines = items
                .iter()
                .map(|item| item.to_line_item(store))
                .collect::<Result<Vec<_>>>()?;
            let outcome = store.add_multiple_to_cart(lines);
            ctx.output.success(&format!(
                "{} added, {} merged",
                outcome.added.len(),
                outcome.merged.len()
            ));
            for rejected in &outcome.rejected {
                ctx.output.warn(&format!("Skipped {}: {}", rejected.key, rejected.error));
            }
        }
        Step::SetQuantity { item } => {
            let quantity = item
                .quantity
                .ok_or_else(|| anyhow!("set-quantity needs a quantity"))?;
            let key = item.key(store)?;
            if !store.update_quantity(&key, quantity) {
                bail!("{} is not in the cart", key);
            }
        }
        Step::Increment { item } => {
            let key = item.key(store)?;
            if !store.increment(&key)? {
                bail!("{} is not in the cart", key);
            }
        }
        Step::Decrement { item } => {
            let key = item.key(store)?;
            if !store.decrement(&key) {
                bail!("{} is not in the cart", key);
            }
        }
        Step::Remove { item } => {
            let key = item.key(store)?;
            if !store.remove_from_cart(&key) {
                ctx.output.debug(&format!("{} was not in the cart", key));
            }
        }
        Step::Toggle { item } => {
            let key = item.key(store)?;
            let selected = store.toggle_selection(&key);
            ctx.output.debug(&format!(
                "{} {}",
                key,
                if selected { "selected" } else { "deselected" }
            ));
        }
        Step::SelectAll => store.select_all(),
        Step::ClearSelection => store.clear_selection(),
        Step::Checkout(input) => {
            let order_id = checkout(store, input, ctx).await?;
            ctx.output.success(&format!("Order placed: {}", order_id));
        }
        Step::DeleteOrders { positions } => delete_orders(store, positions, ctx, yes)?,
        Step::ShowCart => {
            ctx.output.cart(store.cart(), store.selection());
            if !store.cart().is_empty() {
                ctx.output.kv("Selected total", &store.selected_total()?.display());
                ctx.output.kv("Cart total", &store.cart_total()?.display());
            }
        }
        Step::ShowOrders => ctx.output.orders(store.list_orders()),
    }

    Ok(())
}

async fn checkout(
    store: &mut StorefrontStore,
    input: &CheckoutInput,
    ctx: &Context,
) -> Result<OrderId> {
    let method = input.payment_method()?;
    let mut flow = store.begin_checkout()?;

    let session = match &input.login {
        LoginInput::Password { email, password } => {
            store.log_in(&Credentials::new(email.as_str(), password.as_str()))?
        }
        LoginInput::Google { email } => store.log_in_with_google(email.as_deref()),
    };
    ctx.output.debug(&format!("Signed in as {}", session.email));
    flow.log_in(session)?;
    flow.capture_details(input.details.clone())?;
    flow.choose_method(method)?;

    let summary = store.payment_summary(&flow)?;
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    ctx.output.kv("Delivery", &summary.delivery_fee.display());
    ctx.output.kv("Total", &summary.total.display());

    let card = match (method, &input.card) {
        (PaymentMethod::CashOnDelivery, _) => None,
        (PaymentMethod::Card, Some(card)) => Some(CardDetails::from(card)),
        (PaymentMethod::Card, None) if input.use_saved_card => Some(
            store
                .saved_card()?
                .ok_or_else(|| anyhow!("No saved card to pay with"))?,
        ),
        (PaymentMethod::Card, None) => bail!("Card payment needs card details"),
    };
    if let Some(card) = &card {
        ctx.output.kv("Card", &format!("{} {}", card.brand().display_name(), card.masked()));
    }

    let pending = store.begin_payment(&flow, card.as_ref(), input.save_card)?;
    let cancel = pending.cancel_handle();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let spinner = ctx.output.spinner("Processing payment...");
    let receipt = pending.settle().await;
    spinner.finish_and_clear();
    watcher.abort();

    let receipt = receipt?;
    ctx.output.debug(&format!("Payment {} settled", receipt.payment_id));
    Ok(store.complete_checkout(&mut flow, receipt)?)
}

fn delete_orders(
    store: &mut StorefrontStore,
    positions: &[usize],
    ctx: &Context,
    yes: bool,
) -> Result<()> {
    let positions: BTreeSet<usize> = positions.iter().copied().collect();
    if positions.is_empty() {
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} order(s)?", positions.len()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Delete cancelled");
            return Ok(());
        }
    }

    let deleted = store.delete_orders(&positions);
    ctx.output.success(&format!("Deleted {} order(s)", deleted));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Output;
    use std::path::PathBuf;

    fn ctx() -> Context {
        Context {
            config: Default::default(),
            output: Output::new(false, true),
            cwd: PathBuf::from("."),
            config_path: None,
        }
    }

    const SESSION: &str = r##"
[[steps]]
action = "add"
product = "1"
quantity = 2

[[steps]]
action = "add"
product = "2"

[[steps]]
action = "toggle"
product = "2"

[[steps]]
action = "checkout"
method = "card"
save_card = true

[steps.login]
provider = "password"
email = "sana@example.pk"
password = "secret1"

[steps.details]
first_name = "Sana"
last_name = "Iqbal"
country = "Pakistan"
street = "4 Canal View"
city = "Lahore"
state = "Punjab"
zip = "54000"
phone = "03211234567"

[steps.card]
number = "5200 8282 8282 8210"
expiry = "12/29"
cvv = "123"

[[steps]]
action = "delete-orders"
positions = [0]
"##;

    #[tokio::test(start_paused = true)]
    async fn test_session_checks_out_selected_lines() {
        let ctx = ctx();
        let script = SessionScript::parse(SESSION, false).unwrap();
        let mut store = ctx.store();

        for step in &script.steps[..4] {
            execute(&mut store, step, &ctx, true).await.unwrap();
        }

        let orders = store.list_orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].lines.len(), 1);
        assert_eq!(orders[0].lines[0].product_id.as_str(), "1");
        assert!(orders[0].is_paid());

        // The deselected blouse stays behind.
        assert_eq!(store.cart().unique_item_count(), 1);
        assert!(store.saved_card().unwrap().is_some());

        execute(&mut store, &script.steps[4], &ctx, true).await.unwrap();
        assert!(store.list_orders().is_empty());
    }

    #[tokio::test]
    async fn test_missing_line_is_an_error() {
        let ctx = ctx();
        let script = SessionScript::parse(
            "[[steps]]\naction = \"increment\"\nproduct = \"1\"\n",
            false,
        )
        .unwrap();
        let mut store = ctx.store();
        assert!(execute(&mut store, &script.steps[0], &ctx, true).await.is_err());
    }

    #[tokio::test]
    async fn test_card_checkout_without_card_fails() {
        let ctx = ctx();
        let mut store = ctx.store();
        let script = SessionScript::parse(SESSION, false).unwrap();
        execute(&mut store, &script.steps[0], &ctx, true).await.unwrap();

        let Step::Checkout(input) = &script.steps[3] else {
            panic!("expected checkout step");
        };
        let mut input = (**input).clone();
        input.card = None;

        let err = checkout(&mut store, &input, &ctx).await.unwrap_err();
        assert!(err.to_string().contains("card details"));
        assert!(store.list_orders().is_empty());
    }
}
