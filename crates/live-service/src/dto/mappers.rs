//! Entity-to-response mappers

use live_common::auth::RoomToken;
use live_core::entities::{
    Achievement, ChatMessage, InfluencerGoal, LiveSession, ShowcaseProduct, User, Viewer,
};

use super::responses::{
    AchievementResponse, CurrentUserResponse, GoalResponse, MessageResponse, RoomTokenResponse,
    SessionResponse, ShowcaseResponse, UserResponse, ViewerResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            display_name: user.display_name.clone(),
            role: user.role.as_str().to_string(),
            avatar_url: user.avatar_url(),
            created_at: user.created_at,
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: user.role.as_str().to_string(),
            avatar_url: user.avatar_url(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&LiveSession> for SessionResponse {
    fn from(session: &LiveSession) -> Self {
        Self {
            id: session.id.to_string(),
            influencer_id: session.influencer_id.to_string(),
            title: session.title.clone(),
            description: session.description.clone(),
            room_code: session.room_code.to_string(),
            status: session.status.as_str().to_string(),
            scheduled_start: session.scheduled_start,
            actual_start: session.actual_start,
            actual_end: session.actual_end,
            current_viewers: session.current_viewers,
            peak_viewers: session.peak_viewers,
            total_unique_viewers: session.total_unique_viewers,
            total_messages: session.total_messages,
            total_reactions: session.total_reactions,
            total_shares: session.total_shares,
            products_showcased: session.products_showcased,
            total_product_clicks: session.total_product_clicks,
            total_orders: session.total_orders,
            total_revenue_cents: session.total_revenue_cents,
            conversion_rate: session.conversion_rate(),
            duration_seconds: session.duration_seconds(),
            avg_watch_seconds: session.avg_watch_seconds,
            created_at: session.created_at,
        }
    }
}

impl From<&Viewer> for ViewerResponse {
    fn from(viewer: &Viewer) -> Self {
        Self {
            id: viewer.id.to_string(),
            session_id: viewer.session_id.to_string(),
            user_id: viewer.user_id.map(|id| id.to_string()),
            viewer_type: viewer.viewer_type.as_str().to_string(),
            joined_at: viewer.joined_at,
            left_at: viewer.left_at,
            watch_seconds: viewer.watch_seconds,
            messages_sent: viewer.messages_sent,
            reactions_sent: viewer.reactions_sent,
            product_clicks: viewer.product_clicks,
            orders_placed: viewer.orders_placed,
            connection_quality: viewer.connection_quality.as_str().to_string(),
        }
    }
}

impl From<&ChatMessage> for MessageResponse {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id.to_string(),
            session_id: message.session_id.to_string(),
            viewer_id: message.viewer_id.to_string(),
            content: message.content.clone(),
            kind: message.kind.as_str().to_string(),
            is_flagged: message.is_flagged,
            reaction_count: message.reaction_count,
            created_at: message.created_at,
        }
    }
}

impl From<&ShowcaseProduct> for ShowcaseResponse {
    fn from(product: &ShowcaseProduct) -> Self {
        Self {
            id: product.id.to_string(),
            session_id: product.session_id.to_string(),
            product_id: product.product_id.to_string(),
            display_order: product.display_order,
            live_price_cents: product.live_price_cents,
            discount_percent: product.discount_percent,
            quantity_cap: product.quantity_cap,
            quantity_sold: product.quantity_sold,
            remaining: product.remaining(),
            is_sold_out: product.is_sold_out(),
            view_count: product.view_count,
            click_count: product.click_count,
            cart_count: product.cart_count,
            order_count: product.order_count,
            revenue_cents: product.revenue_cents,
            conversion_rate: product.conversion_rate(),
            created_at: product.created_at,
        }
    }
}

impl From<&InfluencerGoal> for GoalResponse {
    fn from(goal: &InfluencerGoal) -> Self {
        Self {
            id: goal.id.to_string(),
            influencer_id: goal.influencer_id.to_string(),
            title: goal.title.clone(),
            description: goal.description.clone(),
            target_value: goal.target_value,
            current_value: goal.current_value,
            progress_percent: goal.progress_percent(),
            status: goal.status.as_str().to_string(),
            due_date: goal.due_date,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        }
    }
}

impl From<&Achievement> for AchievementResponse {
    fn from(achievement: &Achievement) -> Self {
        Self {
            id: achievement.id.to_string(),
            influencer_id: achievement.influencer_id.to_string(),
            title: achievement.title.clone(),
            category: achievement.category.as_str().to_string(),
            points: achievement.points,
            target_value: achievement.target_value,
            earned_at: achievement.earned_at,
        }
    }
}

impl From<RoomToken> for RoomTokenResponse {
    fn from(token: RoomToken) -> Self {
        Self {
            token: token.token,
            room: token.room,
            role: token.role,
            expires_in: token.expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use live_core::entities::{AchievementCategory, SessionStatus, UserRole, ViewerType};
    use live_core::{RoomCode, Snowflake};

    #[test]
    fn test_session_response_includes_derived_metrics() {
        let mut session = LiveSession::new(
            Snowflake::new(1),
            Snowflake::new(100),
            "Friday Drop".to_string(),
            RoomCode::generate(),
        );
        session.record_product_click();
        session.record_product_click();
        session.record_order(2500);

        let resp = SessionResponse::from(&session);
        assert_eq!(resp.id, "1");
        assert_eq!(resp.status, SessionStatus::Scheduled.as_str());
        assert!((resp.conversion_rate - 0.5).abs() < f64::EPSILON);
        assert_eq!(resp.total_revenue_cents, 2500);
    }

    #[test]
    fn test_user_response_hides_email() {
        let user = User::new(
            Snowflake::new(7),
            "private@example.com".to_string(),
            "Host".to_string(),
            UserRole::Influencer,
        );
        let resp = UserResponse::from(&user);
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("email").is_none());
        assert_eq!(json["role"], "influencer");
    }

    #[test]
    fn test_anonymous_viewer_omits_user_id() {
        let viewer = Viewer::new(
            Snowflake::new(1),
            Snowflake::new(10),
            None,
            ViewerType::Anonymous,
        );
        let resp = ViewerResponse::from(&viewer);
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_showcase_response_remaining() {
        let mut product = ShowcaseProduct::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(500),
            0,
        );
        product.quantity_cap = Some(5);
        product.record_order(3, 1000).unwrap();

        let resp = ShowcaseResponse::from(&product);
        assert_eq!(resp.remaining, Some(2));
        assert!(!resp.is_sold_out);
    }

    #[test]
    fn test_goal_response_progress_percent() {
        let mut goal = InfluencerGoal::new(
            Snowflake::new(1),
            Snowflake::new(100),
            "10k revenue".to_string(),
            200,
        )
        .unwrap();
        goal.set_progress(50).unwrap();

        let resp = GoalResponse::from(&goal);
        assert!((resp.progress_percent - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_achievement_response() {
        let achievement = Achievement::new(
            Snowflake::new(1),
            Snowflake::new(100),
            "First sale".to_string(),
            AchievementCategory::Sales,
            25,
        );
        let resp = AchievementResponse::from(&achievement);
        assert_eq!(resp.category, "sales");
        assert_eq!(resp.points, 25);
    }
}
