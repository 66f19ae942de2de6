//! Transactional email over SMTP (STARTTLS) using `lettre`.
//!
//! Configuration comes from `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`,
//! `SMTP_PASSWORD`, `EMAIL_FROM_NAME` and `FRONTEND_URL`. When `SMTP_HOST` is
//! empty, messages are logged and dropped instead of sent, which is what local
//! development and the test suite rely on.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header},
    transport::smtp::authentication::Credentials,
};
use util::config::AppConfig;

type EmailResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

struct SmtpSettings {
    host: String,
    port: u16,
    username: String,
    password: String,
    from_name: String,
    frontend_url: String,
}

impl SmtpSettings {
    fn load() -> Self {
        let config = AppConfig::global();
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            username: config.smtp_username.clone(),
            password: config.smtp_password.clone(),
            from_name: config.email_from_name.clone(),
            frontend_url: config.frontend_url.trim_end_matches('/').to_owned(),
        }
    }
}

pub fn reset_link(frontend_url: &str, token: &str) -> String {
    format!("{}/reset-password?token={}", frontend_url.trim_end_matches('/'), token)
}

pub struct EmailService;

impl EmailService {
    /// Sends the reset link to `to_email`. The link is valid for
    /// `expiry_minutes`.
    pub async fn send_password_reset_email(
        to_email: &str,
        first_name: &str,
        reset_token: &str,
        expiry_minutes: u64,
    ) -> EmailResult {
        let settings = SmtpSettings::load();
        let link = reset_link(&settings.frontend_url, reset_token);

        let text = format!(
            "Hola {first_name},\n\n\
             Recibimos una solicitud para restablecer tu contraseña. Usa el siguiente enlace:\n\n\
             {link}\n\n\
             El enlace expira en {expiry_minutes} minutos.\n\n\
             Si no solicitaste este cambio, ignora este correo.\n\n\
             {}",
            settings.from_name
        );
        let html = format!(
            r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
      <h2>Restablecer contraseña</h2>
      <p>Hola {first_name},</p>
      <p>Recibimos una solicitud para restablecer tu contraseña.</p>
      <p><a href="{link}" style="display: inline-block; padding: 10px 20px; background: #2563eb; color: #fff; text-decoration: none; border-radius: 5px;">Restablecer contraseña</a></p>
      <p>El enlace expira en {expiry_minutes} minutos.</p>
      <p style="color: #dc3545;">Si no solicitaste este cambio, ignora este correo.</p>
      <p>{}</p>
    </div>
  </body>
</html>"#,
            settings.from_name
        );

        Self::send(&settings, to_email, "Restablecer contraseña", text, html).await
    }

    /// Confirmation after a successful reset.
    pub async fn send_password_changed_email(to_email: &str) -> EmailResult {
        let settings = SmtpSettings::load();
        let text = format!(
            "Hola,\n\n\
             Tu contraseña fue actualizada correctamente.\n\n\
             Si no realizaste este cambio, contacta a soporte de inmediato.\n\n\
             {}",
            settings.from_name
        );
        let html = format!(
            "<html><body>\
             <p>Hola,</p>\
             <p>Tu contraseña fue actualizada correctamente.</p>\
             <p>Si no realizaste este cambio, contacta a soporte de inmediato.</p>\
             <p>{}</p>\
             </body></html>",
            settings.from_name
        );

        Self::send(&settings, to_email, "Tu contraseña fue actualizada", text, html).await
    }

    async fn send(
        settings: &SmtpSettings,
        to_email: &str,
        subject: &str,
        text: String,
        html: String,
    ) -> EmailResult {
        if settings.host.is_empty() {
            tracing::debug!(to = to_email, subject, "SMTP_HOST not set, skipping email");
            return Ok(());
        }

        let from = Mailbox::new(Some(settings.from_name.clone()), settings.username.parse()?);
        let email = Message::builder()
            .from(from)
            .to(to_email.parse()?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        transport.send(email).await?;
        tracing::info!(to = to_email, subject, "Email sent");
        Ok(())
    }
}
