use crate::{
    element::{Element, ElementField},
    model::{Cardinality, EntityId, MemberRef, ScalarKind, Schema, SetId},
    value::Value,
};
use chrono::DateTime;
use ulid::Ulid;

///
/// Fixture
///
/// Shared commerce-shaped test model: customers with orders, orders
/// with line items, a complex address type, and a composite-key
/// shipment type. `OrderItem` deliberately has no entity set so expand
/// targets can stay unresolved.
///

pub(crate) struct Fixture {
    pub schema: Schema,

    pub customer: EntityId,
    pub order: EntityId,
    pub order_item: EntityId,
    pub shipment: EntityId,

    pub customers_set: SetId,
    pub orders_set: SetId,

    pub customer_id: MemberRef,
    pub customer_name: MemberRef,
    pub customer_city: MemberRef,
    pub customer_address: MemberRef,
    pub customer_orders: MemberRef,

    pub order_id: MemberRef,
    pub order_total: MemberRef,
    pub order_placed_at: MemberRef,
    pub order_customer: MemberRef,
    pub order_items: MemberRef,

    pub item_sku: MemberRef,
    pub item_quantity: MemberRef,

    pub shipment_carrier: MemberRef,
    pub shipment_tracking: MemberRef,
    pub shipment_weight: MemberRef,
}

pub(crate) fn fixture() -> Fixture {
    let mut builder = Schema::builder();

    let address = builder.declare_type("Address");
    let customer = builder.declare_type("Customer");
    let order = builder.declare_type("Order");
    let order_item = builder.declare_type("OrderItem");
    let shipment = builder.declare_type("Shipment");

    builder.scalar(address, "street", ScalarKind::Text);
    builder.scalar(address, "city", ScalarKind::Text);

    let customer_id = builder.scalar(customer, "id", ScalarKind::Ulid);
    let customer_name = builder.scalar(customer, "name", ScalarKind::Text);
    let customer_city = builder.scalar(customer, "city", ScalarKind::Text);
    let customer_address = builder.complex(customer, "address", address);
    let customer_orders = builder.navigation(customer, "orders", order, Cardinality::Many);
    builder.keys(customer, &[customer_id]);

    let order_id = builder.scalar(order, "id", ScalarKind::Ulid);
    let order_total = builder.scalar(order, "total", ScalarKind::Uint);
    let order_placed_at = builder.scalar(order, "placed_at", ScalarKind::Timestamp);
    let order_customer = builder.navigation(order, "customer", customer, Cardinality::One);
    let order_items = builder.navigation(order, "items", order_item, Cardinality::Many);
    builder.keys(order, &[order_id]);

    let item_id = builder.scalar(order_item, "id", ScalarKind::Ulid);
    let item_sku = builder.scalar(order_item, "sku", ScalarKind::Text);
    let item_quantity = builder.scalar(order_item, "quantity", ScalarKind::Uint);
    builder.keys(order_item, &[item_id]);

    let shipment_carrier = builder.scalar(shipment, "carrier", ScalarKind::Text);
    let shipment_tracking = builder.scalar(shipment, "tracking", ScalarKind::Text);
    let shipment_weight = builder.scalar(shipment, "weight", ScalarKind::Uint);
    builder.keys(shipment, &[shipment_carrier, shipment_tracking]);

    let customers_set = builder.set("customers", customer);
    let orders_set = builder.set("orders", order);
    builder.set("shipments", shipment);

    let schema = builder.build().expect("fixture schema is valid");

    Fixture {
        schema,
        customer,
        order,
        order_item,
        shipment,
        customers_set,
        orders_set,
        customer_id: MemberRef::new(customer, customer_id),
        customer_name: MemberRef::new(customer, customer_name),
        customer_city: MemberRef::new(customer, customer_city),
        customer_address: MemberRef::new(customer, customer_address),
        customer_orders: MemberRef::new(customer, customer_orders),
        order_id: MemberRef::new(order, order_id),
        order_total: MemberRef::new(order, order_total),
        order_placed_at: MemberRef::new(order, order_placed_at),
        order_customer: MemberRef::new(order, order_customer),
        order_items: MemberRef::new(order, order_items),
        item_sku: MemberRef::new(order_item, item_sku),
        item_quantity: MemberRef::new(order_item, item_quantity),
        shipment_carrier: MemberRef::new(shipment, shipment_carrier),
        shipment_tracking: MemberRef::new(shipment, shipment_tracking),
        shipment_weight: MemberRef::new(shipment, shipment_weight),
    }
}

pub(crate) fn ulid(n: u128) -> Ulid {
    Ulid::from(n)
}

pub(crate) fn timestamp(seconds: i64) -> Value {
    Value::Timestamp(DateTime::from_timestamp(seconds, 0).expect("in-range timestamp"))
}

/// Build a customer element; `address` and `orders` are optional parts.
pub(crate) fn customer_element(
    fx: &Fixture,
    id: u128,
    name: &str,
    city: &str,
    address: Option<Element>,
    orders: Vec<Element>,
) -> Element {
    Element::new(
        fx.customer,
        vec![
            ElementField::Scalar(Value::Ulid(ulid(id))),
            ElementField::Scalar(Value::text(name)),
            ElementField::Scalar(Value::text(city)),
            ElementField::One(address.map(Box::new)),
            ElementField::Many(orders),
        ],
    )
}

pub(crate) fn address_element(fx: &Fixture, street: &str, city: &str) -> Element {
    let address = fx.schema.member(fx.customer_address);
    let target = match address.kind {
        crate::model::MemberKind::Complex(target) => target,
        _ => unreachable!("fixture address member is complex"),
    };

    Element::new(
        target,
        vec![
            ElementField::Scalar(Value::text(street)),
            ElementField::Scalar(Value::text(city)),
        ],
    )
}

/// Build an order element; the customer back-reference stays unset.
pub(crate) fn order_element(
    fx: &Fixture,
    id: u128,
    total: u64,
    placed_at: i64,
    items: Vec<Element>,
) -> Element {
    Element::new(
        fx.order,
        vec![
            ElementField::Scalar(Value::Ulid(ulid(id))),
            ElementField::Scalar(Value::Uint(total)),
            ElementField::Scalar(timestamp(placed_at)),
            ElementField::One(None),
            ElementField::Many(items),
        ],
    )
}

pub(crate) fn item_element(fx: &Fixture, id: u128, sku: &str, quantity: u64) -> Element {
    Element::new(
        fx.order_item,
        vec![
            ElementField::Scalar(Value::Ulid(ulid(id))),
            ElementField::Scalar(Value::text(sku)),
            ElementField::Scalar(Value::Uint(quantity)),
        ],
    )
}
