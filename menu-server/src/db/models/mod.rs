//! Database Models

// Serde helpers
pub mod serde_helpers;

// Accounts & billing
pub mod account;

// Menu
pub mod menu_item;

// Operational entities
pub mod customer;
pub mod dining_table;
pub mod expense;
pub mod feedback;
pub mod order;
pub mod staff;

// Re-exports
pub use account::{
    Account, AccountId, AccountUpdate, BillingEntry, ManagerCreate, OwnerCreate, PaymentStatus,
    Plan, Role,
};
pub use customer::{Customer, CustomerCreate, CustomerUpdate};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use expense::{Expense, ExpenseCategory, ExpenseCreate, ExpenseUpdate};
pub use feedback::{Feedback, FeedbackCreate};
pub use menu_item::{ComboItem, MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{
    Order, OrderCreate, OrderLine, OrderLineCreate, OrderPaymentUpdate, OrderStatus,
    OrderStatusUpdate, PaymentMethod,
};
pub use staff::{Staff, StaffCreate, StaffPosition, StaffUpdate};
