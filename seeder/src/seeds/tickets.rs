use crate::seed::Seeder;
use db::models::{
    tickets::{self, TicketPriority, TicketStatus},
    user::{self, Role},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use services::{
    Actor, ServiceError,
    requests::{CreateComment, CreateTicket, UpdateTicket},
    ticket_service::TicketService,
    transition::TransitionPolicy,
};

const SAMPLES: [(&str, &str, &str); 8] = [
    (
        "No puedo acceder a la impresora del departamento",
        "La impresora compartida de la sala 301 no aparece en mi equipo aunque reinicié y revisé la red.",
        "Hardware",
    ),
    (
        "El correo no se sincroniza en mi dispositivo móvil",
        "Recibo correos en la computadora pero no en la aplicación del teléfono.",
        "Email",
    ),
    (
        "Solicitud de instalación de software",
        "Necesito MATLAB en la computadora del laboratorio para un proyecto de investigación.",
        "Software",
    ),
    (
        "Sin conexión Wi-Fi en el edificio 5",
        "La red institucional no asigna dirección IP desde esta mañana.",
        "Network",
    ),
    (
        "Proyector del aula 12 sin señal",
        "El proyector enciende pero no detecta la entrada HDMI.",
        "Hardware",
    ),
    (
        "Restablecer acceso al portal",
        "Olvidé la contraseña del portal de alumnos y el enlace de recuperación no llega.",
        "Accounts",
    ),
    (
        "Licencia de Office vencida",
        "Office indica que la licencia expiró en el equipo de la coordinación.",
        "Software",
    ),
    (
        "Cable de red dañado",
        "El cable del escritorio 4 del laboratorio está roto.",
        "Network",
    ),
];

const COMMENTS: [&str; 4] = [
    "Estoy revisando el problema, les aviso en cuanto tenga novedades.",
    "Gracias por la actualización. ¿Cuándo creen que estará resuelto?",
    "Ya se reemplazó la pieza, por favor confirmen que funciona.",
    "Sigue ocurriendo el mismo error.",
];

pub struct TicketSeeder;

#[async_trait::async_trait]
impl Seeder for TicketSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), ServiceError> {
        if tickets::Entity::find().count(db).await? > 0 {
            return Ok(());
        }

        let users = user::Entity::find().all(db).await?;
        let filers: Vec<Actor> = users
            .iter()
            .filter(|u| u.role != Role::Tecnico)
            .map(|u| Actor::new(u.id, u.role))
            .collect();
        let staff: Vec<Actor> = users
            .iter()
            .filter(|u| u.role.is_staff())
            .map(|u| Actor::new(u.id, u.role))
            .collect();

        if filers.is_empty() || staff.is_empty() {
            return Err(ServiceError::Internal(
                "Seed users first: tickets need a filer and a technician".into(),
            ));
        }

        // Jumps straight to the sampled status, which strict mode would refuse.
        let engine = TicketService::new(db.clone(), TransitionPolicy::Permissive);
        let mut rng = StdRng::from_entropy();
        let priorities = [TicketPriority::Low, TicketPriority::Medium, TicketPriority::High];
        let progress = [
            None,
            Some(TicketStatus::Assigned),
            Some(TicketStatus::InProgress),
            Some(TicketStatus::Resolved),
        ];

        for (title, description, category) in SAMPLES {
            let creator = filers[rng.gen_range(0..filers.len())];
            let ticket = engine
                .create_ticket(
                    &creator,
                    CreateTicket {
                        title: title.into(),
                        description: description.into(),
                        category: category.into(),
                        priority: priorities[rng.gen_range(0..priorities.len())],
                    },
                )
                .await?;

            let Some(status) = progress[rng.gen_range(0..progress.len())] else {
                continue;
            };

            let technician = staff[rng.gen_range(0..staff.len())];
            engine
                .update_ticket(
                    &technician,
                    ticket.id,
                    UpdateTicket {
                        status: Some(status),
                        priority: None,
                        assignee_id: Some(technician.user_id),
                    },
                )
                .await?;

            for author in [technician, creator] {
                let content = COMMENTS.choose(&mut rng).copied().unwrap_or(COMMENTS[0]);
                engine
                    .add_comment(
                        &author,
                        ticket.id,
                        CreateComment {
                            content: content.into(),
                        },
                    )
                    .await?;
            }
        }

        Ok(())
    }
}
