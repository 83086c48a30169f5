//! Notifications Config

use clap::Args;

use kusuri_app::notifications::WhatsAppConfig;

/// Admin notification settings.
///
/// Messages go through the WhatsApp Cloud API only when the phone number id, access token
/// and recipient are all set; otherwise they are written to the log.
#[derive(Debug, Args)]
pub struct NotificationsConfig {
    /// WhatsApp Cloud API base URL
    #[arg(
        long,
        env = "WHATSAPP_API_BASE_URL",
        default_value = "https://graph.facebook.com"
    )]
    pub whatsapp_api_base_url: String,

    /// WhatsApp Cloud API version segment
    #[arg(long, env = "WHATSAPP_API_VERSION", default_value = "v18.0")]
    pub whatsapp_api_version: String,

    /// Sending phone number id
    #[arg(long, env = "WHATSAPP_PHONE_NUMBER_ID")]
    pub whatsapp_phone_number_id: Option<String>,

    /// Cloud API access token
    #[arg(long, env = "WHATSAPP_ACCESS_TOKEN", hide_env_values = true)]
    pub whatsapp_access_token: Option<String>,

    /// Admin number that receives notifications
    #[arg(long, env = "ADMIN_PHONE_NUMBER")]
    pub admin_phone_number: Option<String>,
}

impl NotificationsConfig {
    /// Provider settings, when the provider is fully configured.
    #[must_use]
    pub fn whatsapp(&self) -> Option<WhatsAppConfig> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Some(WhatsAppConfig {
            base_url: self.whatsapp_api_base_url.clone(),
            api_version: self.whatsapp_api_version.clone(),
            phone_number_id: present(&self.whatsapp_phone_number_id)?,
            access_token: present(&self.whatsapp_access_token)?,
            recipient: present(&self.admin_phone_number)?,
        })
    }
}
