//! Order Repository
//!
//! Orders snapshot their line items from the live menu at creation time;
//! later menu edits never touch stored orders.

use super::{BaseRepository, MenuRepository, RepoError, RepoResult};
use crate::db::models::{
    AccountId, Order, OrderCreate, OrderLine, OrderStatus, PaymentMethod, PaymentStatus,
};
use crate::utils::time;
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// All orders of one tenant, newest first
    pub async fn find_all(&self, account: &AccountId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE account = $account ORDER BY created_at DESC")
            .bind(("account", account.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders of one tenant in a given status, newest first
    pub async fn find_by_status(
        &self,
        account: &AccountId,
        status: OrderStatus,
    ) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE account = $account AND status = $status ORDER BY created_at DESC",
            )
            .bind(("account", account.clone()))
            .bind(("status", status))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find one order, scoped to the tenant
    pub async fn find_by_id(&self, account: &AccountId, id: &str) -> RepoResult<Option<Order>> {
        let thing = Self::parse_id(id)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order.filter(|o| o.account == *account))
    }

    /// Create an order for a tenant, snapshotting each requested line from
    /// the live menu (only available items can be ordered).
    pub async fn create(
        &self,
        account: &AccountId,
        menu: &MenuRepository,
        data: OrderCreate,
    ) -> RepoResult<Order> {
        if data.items.is_empty() {
            return Err(RepoError::Validation("Order has no items".to_string()));
        }
        let mut lines: Vec<OrderLine> = Vec::with_capacity(data.items.len());
        let mut total = Decimal::ZERO;
        for requested in &data.items {
            if requested.quantity < 1 {
                return Err(RepoError::Validation(
                    "Line quantity must be at least 1".to_string(),
                ));
            }
            let item = menu
                .find_by_id(account, &requested.item)
                .await?
                .filter(|i| i.is_available)
                .ok_or_else(|| {
                    RepoError::NotFound(format!("Menu item {} not available", requested.item))
                })?;

            total += item.price * Decimal::from(requested.quantity);
            lines.push(OrderLine {
                name: item.name,
                price: item.price,
                quantity: requested.quantity,
                is_combo: item.is_combo,
                combo_items: item.combo_items,
            });
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE order SET
                    account = $account,
                    table_number = $table_number,
                    customer_name = $customer_name,
                    items = $items,
                    total = $total,
                    status = 'pending',
                    payment_method = $payment_method,
                    payment_status = 'unpaid',
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("account", account.clone()))
            .bind(("table_number", data.table_number))
            .bind(("customer_name", data.customer_name))
            .bind(("items", lines))
            .bind(("total", total))
            .bind(("payment_method", data.payment_method))
            .bind(("now", time::now_millis()))
            .await?;

        let created: Option<Order> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Set the order status
    pub async fn set_status(
        &self,
        account: &AccountId,
        id: &str,
        status: OrderStatus,
    ) -> RepoResult<Order> {
        let thing = Self::parse_id(id)?;
        self.find_by_id(account, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status))
            .await?;

        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Set the order payment status (and optionally method)
    pub async fn set_payment(
        &self,
        account: &AccountId,
        id: &str,
        payment_status: PaymentStatus,
        payment_method: Option<PaymentMethod>,
    ) -> RepoResult<Order> {
        let thing = Self::parse_id(id)?;
        self.find_by_id(account, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    payment_status = $payment_status,
                    payment_method = IF $has_method THEN $payment_method ELSE payment_method END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("payment_status", payment_status))
            .bind(("has_method", payment_method.is_some()))
            .bind(("payment_method", payment_method))
            .await?;

        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
