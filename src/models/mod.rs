use std::fmt;

use serde::{Deserialize, Serialize};

/// `success`/`message`/`error` triple shared by every API response.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResponseStatus {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

pub trait ApiResponse {
    fn status(&self) -> &ResponseStatus;
}

macro_rules! api_response {
    ($($ty:ty),* $(,)?) => {
        $(impl ApiResponse for $ty {
            fn status(&self) -> &ResponseStatus {
                &self.status
            }
        })*
    };
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BasicResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct StudentRow {
    pub name: String,
    pub points: i64,
    pub lessons_completed: i64,
    pub is_current_user: bool,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GlobalLeaderboardResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    #[serde(default)]
    pub leaderboard: Vec<StudentRow>,
    #[serde(default)]
    pub current_user_rank: Option<u64>,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfessorRow {
    pub name: String,
    pub level: Option<String>,
    pub rating: Option<f64>,
    pub lessons_created: Option<i64>,
    pub lessons_views: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ProfessorsResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    #[serde(default)]
    pub leaderboard: Vec<ProfessorRow>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BookingRequest {
    pub professor_id: i64,
    /// Local date-time with minute precision, `YYYY-MM-DDTHH:MM`.
    pub meeting_date: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CreateMeetingResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    #[serde(default)]
    pub remaining_points: Option<i64>,
}

api_response!(
    LoginResponse,
    BasicResponse,
    GlobalLeaderboardResponse,
    ProfessorsResponse,
    CreateMeetingResponse,
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingResponseKind {
    Confirm,
    Reject,
}

impl MeetingResponseKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "confirm" => Some(Self::Confirm),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for MeetingResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeetingAction {
    pub meeting_id: i64,
    pub action: MeetingResponseKind,
    pub message: String,
    pub meeting_link: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RespondBody {
    pub action: MeetingResponseKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
}

impl MeetingAction {
    /// The link only travels with a confirmation.
    pub fn body(&self) -> RespondBody {
        let meeting_link = match self.action {
            MeetingResponseKind::Confirm => self.meeting_link.clone(),
            MeetingResponseKind::Reject => None,
        };
        RespondBody {
            action: self.action,
            message: self.message.clone(),
            meeting_link,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: u64,
    pub name: String,
    pub points: i64,
    pub lessons_completed: i64,
    pub is_current_user: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfessorEntry {
    pub rank: u64,
    pub name: String,
    pub level: Option<String>,
    pub rating: f64,
    pub lessons_created: i64,
    pub lessons_views: i64,
}
