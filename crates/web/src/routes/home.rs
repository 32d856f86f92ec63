//! Home page route handler.
//!
//! The page is static marketing content; the only dynamic parts are the
//! header (signed in or not) and the tracking demo.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use deliveryhub_core::{DashboardRole, Member};

use crate::filters;
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Anchor link in the header navigation.
#[derive(Debug, Clone, Copy)]
pub struct NavLink {
    pub label: &'static str,
    pub anchor: &'static str,
}

/// Headline figure such as "10K+ Orders".
#[derive(Debug, Clone, Copy)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

/// Titled blurb used by the benefits, driver and merchant sections.
#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// Delivery service tier.
#[derive(Debug, Clone, Copy)]
pub struct PricingPlan {
    pub name: &'static str,
    pub time: &'static str,
    /// Price per order in đồng.
    pub price: u32,
    /// Undiscounted price in đồng.
    pub original_price: u32,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub popular: bool,
}

impl PricingPlan {
    /// Discount against the original price, rounded to a whole percent.
    #[must_use]
    pub fn savings_percent(&self) -> u32 {
        if self.original_price == 0 || self.price >= self.original_price {
            return 0;
        }
        let saved = self.original_price - self.price;
        (saved * 100 + self.original_price / 2) / self.original_price
    }
}

/// Optional surcharge listed under the plans.
#[derive(Debug, Clone, Copy)]
pub struct Surcharge {
    pub name: &'static str,
    pub price: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub quote: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

/// FAQ questions for one audience.
#[derive(Debug, Clone, Copy)]
pub struct FaqCategory {
    pub label: &'static str,
    pub questions: &'static [Faq],
}

/// One step of the tracking demo timeline.
#[derive(Debug, Clone, Copy)]
pub struct TrackingStep {
    pub label: &'static str,
    pub time: &'static str,
    pub done: bool,
}

/// Result of the tracking demo for an entered order code.
#[derive(Debug, Clone)]
pub struct TrackingDemo {
    pub code: String,
    pub driver: &'static str,
    pub eta: &'static str,
    pub steps: &'static [TrackingStep],
}

// =============================================================================
// Page Content
// =============================================================================

const NAV: &[NavLink] = &[
    NavLink { label: "Lợi ích", anchor: "benefits" },
    NavLink { label: "Cách hoạt động", anchor: "how-it-works" },
    NavLink { label: "Bảng giá", anchor: "pricing" },
    NavLink { label: "Tra cứu", anchor: "tracking" },
    NavLink { label: "Tài xế", anchor: "drivers" },
    NavLink { label: "Người bán", anchor: "merchants" },
];

const HERO_STATS: &[Stat] = &[
    Stat { value: "10K+", label: "Orders" },
    Stat { value: "500+", label: "Drivers" },
    Stat { value: "30 min", label: "Average" },
];

const BENEFITS: &[Feature] = &[
    Feature {
        title: "Fast Delivery",
        description: "Guaranteed delivery within 30 minutes for city center, 2-4 hours for other areas.",
    },
    Feature {
        title: "Safe & Secure",
        description: "Comprehensive insurance, real-time GPS tracking, and driver identity verification.",
    },
    Feature {
        title: "Real-time Tracking",
        description: "Track your order location in real-time with interactive maps and instant notifications.",
    },
    Feature {
        title: "User-friendly App",
        description: "Simple interface, easy to use on all devices with optimized user experience.",
    },
    Feature {
        title: "Flexible Payment",
        description: "Multiple payment methods supported: cash, bank transfer, e-wallet.",
    },
    Feature {
        title: "24/7 Support",
        description: "Professional customer care team, ready to assist anytime, anywhere.",
    },
];

const STEPS: &[Feature] = &[
    Feature {
        title: "Đặt hàng dễ dàng",
        description: "Chỉ cần vài thao tác đơn giản để tạo đơn hàng. Nhập địa chỉ, chọn dịch vụ và xem giá ngay lập tức.",
    },
    Feature {
        title: "Xác nhận thông tin",
        description: "Kiểm tra kỹ địa chỉ giao nhận và thông tin liên hệ. Chọn thời gian giao hàng phù hợp nhất.",
    },
    Feature {
        title: "Tài xế đến lấy hàng",
        description: "Hệ thống tự động tìm tài xế gần nhất và phù hợp. Theo dõi hành trình real-time qua GPS.",
    },
    Feature {
        title: "Giao hàng thành công",
        description: "Nhận hàng an toàn, thanh toán linh hoạt và đánh giá trải nghiệm. Hoàn thành trong vài phút.",
    },
];

const PLANS: &[PricingPlan] = &[
    PricingPlan {
        name: "Standard",
        time: "2-4 giờ",
        price: 15_000,
        original_price: 18_000,
        description: "Giao hàng cơ bản với theo dõi GPS",
        features: &[
            "Theo dõi GPS thời gian thực",
            "Bảo hiểm hàng hóa cơ bản",
            "Hỗ trợ khách hàng 24/7",
            "Thu hộ COD miễn phí",
        ],
        popular: false,
    },
    PricingPlan {
        name: "Fast",
        time: "1-2 giờ",
        price: 25_000,
        original_price: 30_000,
        description: "Dịch vụ ưu tiên với bảo hiểm toàn diện",
        features: &[
            "Tất cả tính năng Standard",
            "Bảo hiểm toàn diện đến 5 triệu",
            "Ưu tiên phân công tài xế",
            "Giao hàng ngoài giờ (phụ phí)",
        ],
        popular: true,
    },
    PricingPlan {
        name: "Express",
        time: "30-60 phút",
        price: 35_000,
        original_price: 45_000,
        description: "Dịch vụ VIP cao cấp với hỗ trợ đặc biệt",
        features: &[
            "Tất cả tính năng Fast",
            "Bảo hiểm VIP đến 10 triệu",
            "Tài xế chuyên nghiệp",
            "Giao hàng 24/7 không phụ phí",
        ],
        popular: false,
    },
];

const SURCHARGES: &[Surcharge] = &[
    Surcharge { name: "Giao hàng cuối tuần", price: "+5,000 VND" },
    Surcharge { name: "Giao hàng ban đêm (22h-6h)", price: "+8,000 VND" },
    Surcharge { name: "Hàng dễ vỡ/đặc biệt", price: "+10,000 VND" },
    Surcharge { name: "Thu hộ COD trên 5 triệu", price: "0.5% giá trị đơn hàng" },
];

const TRACKING_FEATURES: &[&str] = &[
    "Real-time GPS tracking",
    "Instant SMS/Email notifications",
    "Driver info and contact",
    "Complete delivery history",
];

const TRACKING_STEPS: &[TrackingStep] = &[
    TrackingStep { label: "Order created", time: "08:30", done: true },
    TrackingStep { label: "Driver assigned", time: "08:34", done: true },
    TrackingStep { label: "Picked up", time: "08:52", done: true },
    TrackingStep { label: "On the way", time: "09:05", done: false },
    TrackingStep { label: "Delivered", time: "", done: false },
];

const DRIVER_STATS: &[Stat] = &[
    Stat { value: "500+", label: "Active Drivers" },
    Stat { value: "850K", label: "Avg Income/Day" },
    Stat { value: "98%", label: "Satisfaction Rate" },
];

const DRIVER_PERKS: &[Feature] = &[
    Feature {
        title: "Attractive Income",
        description: "Earn 500k - 1.5M VND/day with flexible bonus system",
    },
    Feature {
        title: "Flexible Schedule",
        description: "Choose working hours that fit your personal schedule",
    },
    Feature {
        title: "Performance Bonus",
        description: "Fair rating system with achievement-based bonus levels",
    },
    Feature {
        title: "Vehicle Support",
        description: "Vehicle rental program with preferential prices and comprehensive insurance",
    },
];

const MERCHANT_FEATURES: &[Feature] = &[
    Feature {
        title: "API Integration",
        description: "RESTful API, webhooks and SDKs with a sandbox environment for testing.",
    },
    Feature {
        title: "Bulk Upload Orders",
        description: "Upload hundreds of orders at once from Excel or CSV.",
    },
    Feature {
        title: "Detailed Analytics & Reports",
        description: "Revenue, costs, success rate and customer ratings in real time.",
    },
    Feature {
        title: "Flexible Payment Methods",
        description: "COD collection, bank transfer and e-wallet settlement.",
    },
];

const SOCIAL_STATS: &[Stat] = &[
    Stat { value: "50,000+", label: "Successful Deliveries" },
    Stat { value: "1,000+", label: "Trusted Merchants" },
    Stat { value: "500+", label: "Active Drivers" },
    Stat { value: "4.9/5", label: "Average Rating" },
];

const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        name: "Sarah Johnson",
        role: "Fashion Store Owner",
        quote: "Orders reach my customers the same afternoon and COD settles the next day.",
    },
    Testimonial {
        name: "Michael Chen",
        role: "Restaurant Owner",
        quote: "Express delivery keeps our dishes hot. Customers notice.",
    },
    Testimonial {
        name: "Lisa Nguyen",
        role: "Individual Customer",
        quote: "I can see exactly where my parcel is, no more calling around.",
    },
    Testimonial {
        name: "James Lee",
        role: "Part-time Driver",
        quote: "I pick my own hours and the bonus levels are fair.",
    },
];

const PARTNERS: &[&str] = &["Shopee", "Lazada", "Tiki", "Sendo", "Grab", "Now"];

const FAQ: &[FaqCategory] = &[
    FaqCategory {
        label: "Customer",
        questions: &[
            Faq {
                question: "How to create an order?",
                answer: "You can create orders via website, mobile app or call hotline. Just enter pickup/delivery addresses and goods info, the system will auto-calculate fees and assign drivers.",
            },
            Faq {
                question: "How long is delivery time?",
                answer: "Delivery time depends on service package: Standard (2-4h), Fast (1-2h), Express (30-60 min). Time may vary based on distance and traffic conditions.",
            },
            Faq {
                question: "What payment methods are available?",
                answer: "We support cash, bank transfer, e-wallets (MoMo, ZaloPay, VNPay), credit/debit cards and COD collection.",
            },
            Faq {
                question: "How to track my order?",
                answer: "You can track orders real-time via website or app using order code. System will send SMS/email notifications when status updates.",
            },
        ],
    },
    FaqCategory {
        label: "Driver",
        questions: &[
            Faq {
                question: "Requirements to become a driver?",
                answer: "Must be 18-55 years old, have motorcycle license or higher, own vehicle, smartphone and commit to minimum 20h/week.",
            },
            Faq {
                question: "How much do drivers earn?",
                answer: "Income ranges from 500k-1.5M VND/day depending on orders and level. Performance bonuses and incentive programs available.",
            },
            Faq {
                question: "Is vehicle support available?",
                answer: "Yes, we have vehicle rental program with preferential prices, comprehensive insurance and periodic maintenance support.",
            },
            Faq {
                question: "Are working hours flexible?",
                answer: "Completely flexible. You can choose suitable shifts, just ensure minimum 20h/week commitment.",
            },
        ],
    },
    FaqCategory {
        label: "Merchant",
        questions: &[
            Faq {
                question: "How to integrate API?",
                answer: "We provide RESTful API with full documentation, SDKs for popular languages and sandbox environment for testing. Technical team will support integration.",
            },
            Faq {
                question: "Can I bulk upload orders?",
                answer: "Yes, you can upload hundreds of orders at once via Excel or CSV file. System will auto-process and assign drivers.",
            },
            Faq {
                question: "How are reports and statistics?",
                answer: "Dashboard provides detailed reports on revenue, costs, delivery success rate, customer ratings in real-time.",
            },
            Faq {
                question: "Pricing policy for merchants?",
                answer: "Volume-based pricing: 0-100 orders (18k), 101-500 orders (16k), 500+ orders (14k). Various service packages and features available.",
            },
        ],
    },
];

// =============================================================================
// Templates
// =============================================================================

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Signed-in member, for the header.
    pub member: Option<Member>,
    pub dashboards: &'static [DashboardRole],
    pub nav: &'static [NavLink],
    pub hero_stats: &'static [Stat],
    pub benefits: &'static [Feature],
    pub steps: &'static [Feature],
    pub plans: &'static [PricingPlan],
    pub surcharges: &'static [Surcharge],
    pub tracking_features: &'static [&'static str],
    pub tracking: Option<TrackingDemo>,
    pub driver_stats: &'static [Stat],
    pub driver_perks: &'static [Feature],
    pub merchant_features: &'static [Feature],
    pub social_stats: &'static [Stat],
    pub testimonials: &'static [Testimonial],
    pub partners: &'static [&'static str],
    pub faq: &'static [FaqCategory],
}

impl HomeTemplate {
    fn new(member: Option<Member>, tracking: Option<TrackingDemo>) -> Self {
        Self {
            member,
            dashboards: &DashboardRole::ALL,
            nav: NAV,
            hero_stats: HERO_STATS,
            benefits: BENEFITS,
            steps: STEPS,
            plans: PLANS,
            surcharges: SURCHARGES,
            tracking_features: TRACKING_FEATURES,
            tracking,
            driver_stats: DRIVER_STATS,
            driver_perks: DRIVER_PERKS,
            merchant_features: MERCHANT_FEATURES,
            social_stats: SOCIAL_STATS,
            testimonials: TESTIMONIALS,
            partners: PARTNERS,
            faq: FAQ,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Query parameters of the home page.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    /// Order code entered in the tracking demo.
    pub track: Option<String>,
}

/// Tracking demo for an entered code. Blank codes show nothing.
fn tracking_demo(code: Option<&str>) -> Option<TrackingDemo> {
    let code = code.map(str::trim).filter(|c| !c.is_empty())?;
    Some(TrackingDemo {
        code: code.to_uppercase(),
        driver: "John Doe",
        eta: "09:20",
        steps: TRACKING_STEPS,
    })
}

/// Display the home page.
#[instrument(skip(state, session, query))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<HomeQuery>,
) -> impl IntoResponse {
    let member = state.members().current_member(&session).await;
    HomeTemplate::new(member, tracking_demo(query.track.as_deref()))
}
