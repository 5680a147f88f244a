use clap::{Args, Subcommand};
use storefront_app::domain::orders::records::{OrderDetails, OrderRecord};

mod show;
mod status;
mod tracking;

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// Print an order with its items
    Show(show::ShowOrderArgs),
    /// Move an order to a new status
    Status(status::SetStatusArgs),
    /// Attach a carrier tracking number
    Tracking(tracking::SetTrackingArgs),
}

pub(crate) async fn run(command: OrderCommand) -> Result<(), String> {
    match command.command {
        OrderSubcommand::Show(args) => show::run(args).await,
        OrderSubcommand::Status(args) => status::run(args).await,
        OrderSubcommand::Tracking(args) => tracking::run(args).await,
    }
}

fn print_order(order: &OrderRecord) {
    println!("order_number: {}", order.order_number);
    println!("status: {}", order.status);
    println!("customer: {} <{}>", order.customer.name, order.customer.email);
    println!("payment_method: {}", order.payment_method.as_str());
    println!("items_total: {}", order.items_total);
    println!("discount: {}", order.discount);
    println!("shipping_cost: {}", order.shipping_cost);
    println!("cod_fee: {}", order.cod_fee);
    println!("total: {}", order.total);
    println!(
        "tracking_number: {}",
        order.tracking_number.as_deref().unwrap_or("none")
    );
    println!("created_at: {}", order.created_at);
}

fn print_details(details: &OrderDetails) {
    print_order(&details.order);

    for item in &details.items {
        println!(
            "item: {} x {} ({}) @ {}",
            item.quantity, item.product_name, item.variant_name, item.unit_price
        );
    }
}
