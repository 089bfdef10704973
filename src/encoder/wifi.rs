use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WifiSecurity {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    Open,
}

impl WifiSecurity {
    fn as_str(&self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::Open => "nopass",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WifiConfig {
    pub ssid: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub security: WifiSecurity,
    #[serde(default)]
    pub hidden: bool,
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | ';' | ',' | ':' | '"') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Wi-Fi network payload understood by phone camera apps.
pub fn encode_wifi(config: &WifiConfig) -> String {
    let password = match config.security {
        WifiSecurity::Open => String::new(),
        _ => escape(config.password.as_deref().unwrap_or_default()),
    };
    format!(
        "WIFI:T:{};S:{};P:{};H:{};;",
        config.security.as_str(),
        escape(config.ssid.trim()),
        password,
        config.hidden
    )
}

/// SMS payload. The message part is left out when blank.
pub fn encode_sms(number: &str, message: Option<&str>) -> String {
    match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(message) => format!("SMSTO:{}:{}", number.trim(), message),
        None => format!("SMSTO:{}", number.trim()),
    }
}
