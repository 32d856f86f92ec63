//! Role dashboard handlers for customers, couriers and merchants.
//!
//! Each dashboard greets the member, lists the role's sections and shows the
//! role's collection. Collection reads go through [`CollectionStore`].

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use deliveryhub_core::{CollectionItem, DashboardRole, Member};

use crate::error::{AppError, set_sentry_user};
use crate::filters;
use crate::middleware::CurrentMember;
use crate::services::CollectionStore;
use crate::state::AppState;

/// A card on a role dashboard.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSection {
    pub title: &'static str,
    pub description: &'static str,
}

/// Per-role dashboard content.
struct RoleContent {
    /// Collection listed on the dashboard.
    collection: &'static str,
    /// Heading of the collection list.
    list_title: &'static str,
    sections: &'static [DashboardSection],
}

const CUSTOMER: RoleContent = RoleContent {
    collection: "orders",
    list_title: "Đơn hàng của tôi",
    sections: &[
        DashboardSection {
            title: "Tạo đơn hàng",
            description: "Nhập địa chỉ lấy và giao, chọn gói dịch vụ và xem giá ngay.",
        },
        DashboardSection {
            title: "Theo dõi đơn hàng",
            description: "Xem vị trí tài xế và trạng thái đơn theo thời gian thực.",
        },
        DashboardSection {
            title: "Ví và thanh toán",
            description: "Số dư ví, lịch sử giao dịch và phương thức thanh toán.",
        },
    ],
};

const COURIER: RoleContent = RoleContent {
    collection: "available-orders",
    list_title: "Đơn hàng có thể nhận",
    sections: &[
        DashboardSection {
            title: "Nhận đơn",
            description: "Danh sách đơn gần bạn đang chờ tài xế.",
        },
        DashboardSection {
            title: "Đơn đang giao",
            description: "Cập nhật trạng thái lấy hàng và giao hàng.",
        },
        DashboardSection {
            title: "Thu nhập",
            description: "Thu nhập theo ngày, thưởng hiệu suất và cấp độ.",
        },
    ],
};

const MERCHANT: RoleContent = RoleContent {
    collection: "deliveries",
    list_title: "Đơn giao của cửa hàng",
    sections: &[
        DashboardSection {
            title: "Chờ xử lý",
            description: "Đơn mới đang chờ tài xế nhận.",
        },
        DashboardSection {
            title: "Đang giao",
            description: "Đơn đang trên đường tới khách hàng.",
        },
        DashboardSection {
            title: "Đã giao",
            description: "Đơn đã hoàn thành và tiền thu hộ COD.",
        },
    ],
};

/// Shared role dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/role.html")]
pub struct RoleDashboardTemplate {
    pub role: DashboardRole,
    pub dashboards: &'static [DashboardRole],
    pub member: Member,
    pub sections: &'static [DashboardSection],
    pub list_title: &'static str,
    pub items: Vec<CollectionItem>,
    pub total_count: usize,
}

async fn render(
    state: &AppState,
    role: DashboardRole,
    content: &RoleContent,
    member: Member,
) -> Result<RoleDashboardTemplate, AppError> {
    set_sentry_user(&member.id, Some(member.email.as_str()));
    let listing = state.crud().get_all(content.collection).await?;

    Ok(RoleDashboardTemplate {
        role,
        dashboards: &DashboardRole::ALL,
        member,
        sections: content.sections,
        list_title: content.list_title,
        items: listing.items,
        total_count: listing.total_count,
    })
}

/// Display the customer dashboard.
#[instrument(skip_all)]
pub async fn customer(
    State(state): State<AppState>,
    CurrentMember(member): CurrentMember,
) -> Result<RoleDashboardTemplate, AppError> {
    render(&state, DashboardRole::Customer, &CUSTOMER, member).await
}

/// Display the courier dashboard.
#[instrument(skip_all)]
pub async fn courier(
    State(state): State<AppState>,
    CurrentMember(member): CurrentMember,
) -> Result<RoleDashboardTemplate, AppError> {
    render(&state, DashboardRole::Courier, &COURIER, member).await
}

/// Display the merchant dashboard.
#[instrument(skip_all)]
pub async fn merchant(
    State(state): State<AppState>,
    CurrentMember(member): CurrentMember,
) -> Result<RoleDashboardTemplate, AppError> {
    render(&state, DashboardRole::Merchant, &MERCHANT, member).await
}
