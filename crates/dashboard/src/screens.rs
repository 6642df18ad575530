//! Per-entity list screens: columns and paging mode.
//!
//! Admin lists (orders, clients, users, devices) page by offset; browse
//! lists (products, logs) scroll infinitely.

use smp_client::resource::{ClientService, OrderService, ProductService, UserService};
use smp_client::{DeviceService, LogService};
use smp_core::{Client, Device, Log, Order, Product, User};

use crate::list::{ListController, PagingMode};
use crate::table::Column;

pub type OrdersList = ListController<Order, OrderService>;
pub type ProductsList = ListController<Product, ProductService>;
pub type ClientsList = ListController<Client, ClientService>;
pub type UsersList = ListController<User, UserService>;
pub type DevicesList = ListController<Device, DeviceService>;
pub type LogsList = ListController<Log, LogService>;

pub fn orders(service: OrderService, page_size: u32) -> OrdersList {
    ListController::new(service, PagingMode::Offset { page_size })
}

pub fn products(service: ProductService, page_size: u32) -> ProductsList {
    ListController::new(service, PagingMode::Infinite { page_size })
}

pub fn clients(service: ClientService, page_size: u32) -> ClientsList {
    ListController::new(service, PagingMode::Offset { page_size })
}

pub fn users(service: UserService, page_size: u32) -> UsersList {
    ListController::new(service, PagingMode::Offset { page_size })
}

pub fn devices(service: DeviceService, page_size: u32) -> DevicesList {
    ListController::new(service, PagingMode::Offset { page_size })
}

pub fn logs(service: LogService, page_size: u32) -> LogsList {
    ListController::new(service, PagingMode::Infinite { page_size })
}

fn opt<T: ToString>(v: &Option<T>) -> String {
    v.as_ref().map(ToString::to_string).unwrap_or_else(|| "-".to_string())
}

pub fn order_columns() -> Vec<Column<Order>> {
    vec![
        Column::new("code", "Code", |o: &Order| o.code.to_string()),
        Column::new("clientName", "Client", |o: &Order| opt(&o.client_name)),
        Column::new("productCode", "Product", |o: &Order| opt(&o.product_code)),
        Column::new("totalQuantity", "Total", |o: &Order| o.total_quantity.to_string()),
        Column::new("producedQuantity", "Produced", |o: &Order| {
            o.produced_quantity.to_string()
        }),
        Column::new("progress", "Progress", |o: &Order| {
            format!("{:.0}%", o.progress_percent())
        })
        .unsortable(),
        Column::new("deliveryDate", "Delivery", |o: &Order| opt(&o.delivery_date)),
        Column::new("status", "Status", |o: &Order| o.status.label().to_string()),
    ]
}

pub fn product_columns() -> Vec<Column<Product>> {
    vec![
        Column::new("code", "Code", |p: &Product| p.code.clone()),
        Column::new("description", "Description", |p: &Product| p.description.clone()),
    ]
}

pub fn client_columns() -> Vec<Column<Client>> {
    vec![
        Column::new("id", "ID", |c: &Client| c.id.to_string()),
        Column::new("name", "Name", |c: &Client| c.name.clone()),
    ]
}

pub fn user_columns() -> Vec<Column<User>> {
    vec![
        Column::new("firstName", "Name", |u: &User| u.full_name()),
        Column::new("username", "Username", |u: &User| u.username.to_string()),
        Column::new("email", "E-mail", |u: &User| u.email.clone()),
        Column::new("role", "Role", |u: &User| u.role.to_string()),
    ]
}

pub fn device_columns() -> Vec<Column<Device>> {
    vec![
        Column::new("macAddress", "MAC", |d: &Device| d.mac_address.clone()),
        Column::new("ipAddress", "IP", |d: &Device| opt(&d.ip_address)),
        Column::new("status", "Status", |d: &Device| d.status.as_str().to_string()),
        Column::new("lastSeen", "Last seen", |d: &Device| {
            d.last_seen
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string())
        }),
    ]
}

pub fn log_columns() -> Vec<Column<Log>> {
    vec![
        Column::new("createdAt", "Time", |l: &Log| {
            l.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
        }),
        Column::new("deviceId", "Device", |l: &Log| opt(&l.device_id)),
        Column::new("orderCode", "Order", |l: &Log| opt(&l.order_code)),
        Column::new("quantityProduced", "Qty", |l: &Log| l.quantity_produced.to_string()),
        Column::new("cycleTime", "Cycle (s)", |l: &Log| format!("{:.1}", l.cycle_time)),
        Column::new("efficiency", "Efficiency", |l: &Log| {
            format!("{:.0}%", l.efficiency_percent())
        })
        .unsortable(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use smp_core::{DeviceId, LogId, OrderCode, OrderId, OrderStatus};

    use crate::table::TableView;

    #[test]
    fn order_row_shows_derived_progress() {
        let order = Order {
            id: OrderId::new(1),
            code: OrderCode::normalize("5").unwrap(),
            client_id: None,
            client_name: Some("Acme".into()),
            product_id: None,
            product_code: None,
            product_description: None,
            total_quantity: 40,
            produced_quantity: 10,
            delivery_date: NaiveDate::from_ymd_opt(2026, 12, 1),
            status: OrderStatus::Started,
        };
        let view = TableView::build(&[order], &order_columns(), None, None, false);
        let cells = &view.rows[0].cells;
        assert_eq!(cells[0], "OP-0000005");
        assert_eq!(cells[2], "-");
        assert_eq!(cells[5], "25%");
        assert_eq!(cells[6], "2026-12-01");
        assert!(view.click_header("progress").is_none());
    }

    #[test]
    fn log_row_formats_time() {
        let log = Log {
            id: LogId::new(1),
            created_at: Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap(),
            cycle_time: 12.5,
            quantity_produced: 3,
            paused_time: 0.0,
            total_time: 60.0,
            device_id: Some(DeviceId::new(9)),
            order_code: None,
        };
        let view = TableView::build(&[log], &log_columns(), None, None, false);
        assert_eq!(view.rows[0].cells[0], "2026-10-16 08:30:00");
        assert_eq!(view.rows[0].cells[1], "9");
        assert_eq!(view.rows[0].cells[4], "12.5");
    }
}
