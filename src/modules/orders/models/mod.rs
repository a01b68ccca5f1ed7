mod order;

pub use order::{
    CheckoutItemRequest, CheckoutRequest, Order, OrderItem, OrderStatus, UpdateOrderStatusRequest,
};
