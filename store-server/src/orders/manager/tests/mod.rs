use super::*;
use crate::store::{CouponStore, OrderStore, ProductStore};
use shared::models::{
    BuyerSnapshot, CartLineInput, Coupon, DiscountType, OrderCreate, PaymentMethod, Product,
};
use shared::util;

mod test_transitions;

const NOW: Timestamp = 1_700_000_000_000;
const DAY_MS: Timestamp = 86_400_000;

fn create_test_manager() -> (OrdersManager, ProductStore, CouponStore, OrderStore) {
    let products = ProductStore::open_in_memory();
    let coupons = CouponStore::open_in_memory();
    let orders = OrderStore::open_in_memory();
    let manager = OrdersManager::new(products.clone(), coupons.clone(), orders.clone());
    (manager, products, coupons, orders)
}

fn seed_product(products: &ProductStore, name: &str, price: f64, gst_rate: i32) -> Product {
    let product = Product {
        id: util::entity_id(),
        name: name.to_string(),
        price,
        gst_rate,
        is_active: true,
        created_at: NOW,
    };
    products.insert(product.clone()).unwrap();
    product
}

fn seed_coupon(coupons: &CouponStore, coupon: Coupon) -> Coupon {
    coupons.insert(coupon.clone()).unwrap();
    coupon
}

fn percentage_coupon(name: &str, value: f64, min_purchase: f64) -> Coupon {
    Coupon {
        id: util::entity_id(),
        name: name.to_string(),
        discount_type: DiscountType::Percentage,
        discount_value: value,
        max_discount: None,
        min_purchase,
        usage_limit: 100,
        times_used: 0,
        gift_product_id: None,
        expires_at: NOW + 30 * DAY_MS,
        is_active: true,
        created_at: NOW,
    }
}

fn buyer() -> BuyerSnapshot {
    BuyerSnapshot {
        name: "Asha Verma".to_string(),
        phone: "9876543210".to_string(),
        address: "12 MG Road, Jaipur".to_string(),
    }
}

fn order_create(lines: Vec<CartLineInput>, coupon_code: Option<&str>) -> OrderCreate {
    OrderCreate {
        buyer: buyer(),
        lines,
        coupon_code: coupon_code.map(String::from),
        payment_method: PaymentMethod::Cod,
    }
}

fn cart_line(product: &Product, quantity: i32) -> CartLineInput {
    CartLineInput {
        product_id: product.id.clone(),
        quantity,
    }
}
