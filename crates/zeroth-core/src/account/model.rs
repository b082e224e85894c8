use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sex field of the registration form. `N` means "prefer not to answer".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountSex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[default]
    #[serde(rename = "N")]
    NotAnswered,
}

impl AccountSex {
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::NotAnswered => "N",
        }
    }
}

impl std::str::FromStr for AccountSex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            "N" | "" => Ok(Self::NotAnswered),
            other => Err(format!("unknown sex '{other}', expected M, F or N")),
        }
    }
}

/// New account as submitted to `POST /users/register`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Real name.
    pub user_name: String,
    /// Public account name shown after login.
    pub screen_name: String,
    pub password: String,
    pub sex: AccountSex,
    pub birth_date: NaiveDate,
    /// Prefecture of residence.
    pub address: String,
    pub email: String,
}

/// Prefecture choices offered for [`Registration::address`].
pub const PREFECTURES: [&str; 47] = [
    "北海道", "青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県",
    "茨城県", "栃木県", "群馬県", "埼玉県", "千葉県", "東京都", "神奈川県",
    "新潟県", "富山県", "石川県", "福井県", "山梨県", "長野県", "岐阜県",
    "静岡県", "愛知県", "三重県", "滋賀県", "京都府", "大阪府", "兵庫県",
    "奈良県", "和歌山県", "鳥取県", "島根県", "岡山県", "広島県", "山口県",
    "徳島県", "香川県", "愛媛県", "高知県", "福岡県", "佐賀県", "長崎県",
    "熊本県", "大分県", "宮崎県", "鹿児島県", "沖縄県",
];
