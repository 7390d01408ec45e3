//! Time cards and safety incidents.

use super::{
    AttrKind, Column, Field, Filter, Input, InputKind, RefStyle, ResourceSpec, Source, Target,
    Verb,
};

pub static TIME_CARDS: ResourceSpec = ResourceSpec {
    name: "time-cards",
    aliases: &["time-card"],
    singular: "time card",
    plural: "time cards",
    about: "Driver time cards for tendered shifts",
    path: "/v1/time-cards",
    verbs: Verb::ALL,
    default_sort: None,
    include: &[],
    fieldsets: &[(
        "time-cards",
        "status,ticket-number,start-at,end-at,total-hours,approval-count,down-minutes,tender-job-schedule-shift,job,job-production-plan,driver,trucker,job-schedule-shift,broker-tender",
    )],
    filters: &[
        Filter::same("status", "Filter by status"),
        Filter::same("is-audited", "Filter by audit status (true/false)"),
        Filter::same("broker-tender", "Filter by broker tender ID"),
        Filter::same("customer", "Filter by customer ID"),
        Filter::same("trucker", "Filter by trucker ID"),
        Filter::same("driver", "Filter by driver user ID"),
        Filter::same("broker", "Filter by broker ID"),
        Filter::same("job-number", "Filter by job number"),
        Filter::same("ticket-number", "Filter by ticket number"),
        Filter::same("tender-job-schedule-shift", "Filter by tender job schedule shift ID"),
        Filter::same("shift-date", "Filter by shift date (YYYY-MM-DD)"),
        Filter::same("shift-date-min", "Filter by minimum shift date"),
        Filter::same("shift-date-max", "Filter by maximum shift date"),
        Filter::same("approval-count-min", "Filter by minimum approval count"),
    ],
    fields: &[
        Field::new("id", Source::Id),
        Field::text("status", "status").optional(),
        Field::text("ticket_number", "ticket-number").optional(),
        Field::attr("start_at", "start-at", AttrKind::DateTime).optional(),
        Field::attr("end_at", "end-at", AttrKind::DateTime).optional(),
        Field::attr("total_hours", "total-hours", AttrKind::Decimal).optional(),
        Field::attr("approval_count", "approval-count", AttrKind::Integer).optional(),
        Field::attr("down_minutes", "down-minutes", AttrKind::Integer).optional(),
        Field::rel_id("trucker_id", "trucker").optional(),
        Field::rel_id("driver_id", "driver").optional(),
        Field::rel_id("job_id", "job").optional(),
        Field::rel_id("job_production_plan_id", "job-production-plan").optional(),
        Field::rel_id("tender_job_schedule_shift_id", "tender-job-schedule-shift").optional(),
        Field::rel_id("job_schedule_shift_id", "job-schedule-shift").optional(),
        Field::rel_id("broker_tender_id", "broker-tender").optional(),
    ],
    columns: &[
        Column::new("ID", &["id"]),
        Column::new("STATUS", &["status"]),
        Column::new("TICKET", &["ticket_number"]).max(15),
        Column::new("START", &["start_at"]),
        Column::new("END", &["end_at"]),
        Column::new("HOURS", &["total_hours"]),
        Column::new("APPROVALS", &["approval_count"]),
        Column::new("DRIVER", &["driver_id"]),
        Column::new("SHIFT", &["tender_job_schedule_shift_id"]),
    ],
    inputs: &[
        Input::to_one("broker-tender", "broker-tenders", "Broker tender ID").required(),
        Input::to_one("tender-job-schedule-shift", "tender-job-schedule-shifts", "Tender job schedule shift ID").required(),
        Input::text("ticket-number", "Ticket number"),
        Input::text("start-at", "Start time (ISO 8601)"),
        Input::text("end-at", "End time (ISO 8601)"),
        Input::attr("down-minutes", InputKind::Integer, "Down minutes"),
        Input::attr("submitted-travel-minutes", InputKind::Integer, "Submitted travel minutes"),
        Input::attr("enforce-ticket-number-uniqueness", InputKind::Bool, "Enforce ticket number uniqueness (true/false)"),
        Input::text("approval-process", "Approval process").choices(&["admin", "field"]),
        Input::attr("generate-broker-invoice", InputKind::Bool, "Generate broker invoice (true/false)"),
        Input::attr("generate-trucker-invoice", InputKind::Bool, "Generate trucker invoice (true/false)"),
    ],
};

const INCIDENT_STATUSES: &[&str] = &["open", "closed", "abandoned", "processing", "parked"];
const INCIDENT_KINDS: &[&str] = &[
    "near_miss",
    "good_catch",
    "damage",
    "overloading",
    "work_zone_intrusion",
];
const INCIDENT_SEVERITIES: &[&str] = &["low", "medium", "high", "catastrophic"];

pub static SAFETY_INCIDENTS: ResourceSpec = ResourceSpec {
    name: "safety-incidents",
    aliases: &["safety-incident"],
    singular: "safety incident",
    plural: "safety incidents",
    about: "Safety incidents reported against any organization or asset",
    path: "/v1/safety-incidents",
    verbs: Verb::ALL,
    default_sort: None,
    include: &[],
    fieldsets: &[],
    filters: &[
        Filter::same("status", "Filter by status"),
        Filter::same("kind", "Filter by kind"),
        Filter::same("severity", "Filter by severity"),
        Filter::same("broker", "Filter by broker ID"),
        Filter::same("customer", "Filter by customer ID"),
        Filter::same("trucker", "Filter by trucker ID"),
        Filter::value("material-site", "material_site", "Filter by material site ID"),
        Filter::value("job-production-plan", "job_production_plan", "Filter by job production plan ID"),
        Filter::same("equipment", "Filter by equipment ID"),
        Filter::same("assignee", "Filter by assignee user ID"),
        Filter::value("created-by", "created_by", "Filter by creator user ID"),
    ],
    fields: &[
        Field::new("id", Source::Id),
        Field::text("status", "status").optional(),
        Field::text("kind", "kind").optional(),
        Field::text("severity", "severity").optional(),
        Field::text("headline", "headline").optional(),
        Field::text("description", "description").optional(),
        Field::attr("start_at", "start-at", AttrKind::DateTime).optional(),
        Field::attr("end_at", "end-at", AttrKind::DateTime).optional(),
        Field::attr("natures", "natures", AttrKind::List).optional(),
        Field::attr("did_stop_work", "did-stop-work", AttrKind::Bool),
        Field::attr("net_impact_tons", "net-impact-tons", AttrKind::Decimal).optional(),
        Field::new("subject_type", Source::RelType("subject")).optional(),
        Field::rel_id("subject_id", "subject").optional(),
        Field::new("subject", Source::RelRef("subject", RefStyle::Paren)).optional(),
        Field::rel_id("assignee_id", "assignee").optional(),
        Field::rel_id("parent_id", "parent").optional(),
    ],
    columns: &[
        Column::new("ID", &["id"]),
        Column::new("STATUS", &["status"]),
        Column::new("KIND", &["kind"]),
        Column::new("SEVERITY", &["severity"]),
        Column::new("START", &["start_at"]),
        Column::new("SUBJECT", &["subject"]).max(30),
        Column::new("HEADLINE", &["headline"]).max(40),
    ],
    inputs: &[
        Input::new("subject-type", Target::PolyType { rel: "subject" }, "Subject type (JSON:API type, e.g. brokers)").required(),
        Input::new("subject-id", Target::PolyId { rel: "subject" }, "Subject ID").required(),
        Input::text("start-at", "Start timestamp (ISO 8601)").required(),
        Input::text("end-at", "End timestamp (ISO 8601)"),
        Input::text("status", "Status").required().choices(INCIDENT_STATUSES),
        Input::text("kind", "Kind").choices(INCIDENT_KINDS),
        Input::text("severity", "Severity").choices(INCIDENT_SEVERITIES),
        Input::text("headline", "Headline text"),
        Input::text("description", "Description text"),
        Input::attr("natures", InputKind::List, "Incident natures (comma-separated: personal,property)"),
        Input::attr("did-stop-work", InputKind::Bool, "Whether work stopped (true/false)"),
        Input::attr("net-impact-tons", InputKind::Number, "Net impact tons (overloading only)"),
        Input::to_one("parent", "incidents", "Parent incident ID"),
        Input::to_one("equipment", "equipment", "Equipment ID"),
        Input::to_one("job-production-plan", "job-production-plans", "Job production plan ID"),
        Input::to_one("assignee", "users", "Assignee user ID"),
        Input::to_one("tender-job-schedule-shift", "tender-job-schedule-shifts", "Tender job schedule shift ID"),
    ],
};
