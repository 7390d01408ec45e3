//! Jobs, job sites, job schedule shifts.

use super::{
    AttrKind, Column, Field, Filter, Input, InputKind, RefStyle, ResourceSpec, Source, Target,
    Verb,
};

const START_SITE_TYPES: &[&str] = &["job-sites", "material-sites"];

pub static JOBS: ResourceSpec = ResourceSpec {
    name: "jobs",
    aliases: &["job"],
    singular: "job",
    plural: "jobs",
    about: "Jobs ordered by customers",
    path: "/v1/jobs",
    verbs: Verb::ALL,
    default_sort: None,
    include: &["job-site", "customer", "job-production-plan"],
    fieldsets: &[
        (
            "jobs",
            "external-job-number,notes,dispatch-instructions,is-prevailing-wage,loaded-miles,job-site,customer,job-production-plan,start-site,material-types,trailer-classifications",
        ),
        ("job-sites", "name"),
        ("customers", "company-name"),
        ("job-production-plans", "job-number,job-name"),
    ],
    filters: &[
        Filter::same("customer", "Filter by customer ID"),
        Filter::same("job-site", "Filter by job site ID"),
        Filter::same("start-date", "Filter by start date (YYYY-MM-DD)"),
        Filter::same("start-at-min", "Filter by minimum start time (ISO 8601)"),
        Filter::same("start-at-max", "Filter by maximum start time (ISO 8601)"),
        Filter::same("broker", "Filter by broker ID"),
        Filter::same("trucker", "Filter by trucker ID"),
        Filter::same("job-production-plan", "Filter by job production plan ID"),
        Filter::same("external-job-number", "Filter by external job number"),
    ],
    fields: &[
        Field::new("id", Source::Id),
        Field::text("external_job_number", "external-job-number").optional(),
        Field::joined("job_production_plan", "job-production-plan", &["job-number", "job-name"]).optional(),
        Field::rel_id("job_production_plan_id", "job-production-plan").optional(),
        Field::joined("job_site", "job-site", &["name"]).optional(),
        Field::rel_id("job_site_id", "job-site").optional(),
        Field::joined("customer", "customer", &["company-name"]).optional(),
        Field::rel_id("customer_id", "customer").optional(),
        Field::new("start_site", Source::RelRef("start-site", RefStyle::Paren)).optional(),
        Field::new("material_type_ids", Source::RelIds("material-types")).optional(),
        Field::new("trailer_classification_ids", Source::RelIds("trailer-classifications")).optional(),
        Field::attr("is_prevailing_wage", "is-prevailing-wage", AttrKind::Bool),
        Field::attr("loaded_miles", "loaded-miles", AttrKind::Decimal).optional(),
        Field::text("notes", "notes").optional(),
        Field::text("dispatch_instructions", "dispatch-instructions").optional(),
    ],
    columns: &[
        Column::new("ID", &["id"]),
        Column::new("EXTERNAL JOB NUMBER", &["external_job_number"]).max(20),
        Column::new("JOB PRODUCTION PLAN", &["job_production_plan", "job_production_plan_id"]).max(30),
        Column::new("JOB SITE", &["job_site", "job_site_id"]).max(30),
        Column::new("CUSTOMER", &["customer", "customer_id"]).max(30),
    ],
    inputs: &[
        Input::to_one("customer", "customers", "Customer ID").required(),
        Input::to_one("job-site", "job-sites", "Job site ID").required(),
        Input::new("start-site-type", Target::PolyType { rel: "start-site" }, "Start site type (job-sites or material-sites)")
            .choices(START_SITE_TYPES),
        Input::new("start-site", Target::PolyId { rel: "start-site" }, "Start site ID (requires --start-site-type)"),
        Input::to_one("job-production-plan", "job-production-plans", "Job production plan ID"),
        Input::to_one("foreman", "users", "Foreman user ID"),
        Input::to_many("material-types", "material-types", "Material type IDs (comma-separated)").required(),
        Input::to_many("trailer-classifications", "trailer-classifications", "Trailer classification IDs (comma-separated)")
            .required(),
        Input::to_many("material-sites", "material-sites", "Material site IDs (comma-separated)"),
        Input::text("notes", "Notes"),
        Input::attr("is-prevailing-wage", InputKind::Bool, "Prevailing wage job (true/false)"),
        Input::attr("prevailing-wage-hourly-rate", InputKind::Number, "Prevailing wage hourly rate"),
        Input::text("dispatch-instructions", "Dispatch instructions"),
        Input::attr("loaded-miles", InputKind::Number, "Loaded miles"),
    ],
};

pub static JOB_SITES: ResourceSpec = ResourceSpec {
    name: "job-sites",
    aliases: &["job-site"],
    singular: "job site",
    plural: "job sites",
    about: "Locations where work is delivered",
    path: "/v1/job-sites",
    verbs: Verb::ALL,
    default_sort: Some("name"),
    include: &["customer", "broker"],
    fieldsets: &[
        ("job-sites", "name,is-active,address,customer,broker"),
        ("customers", "company-name"),
        ("brokers", "company-name"),
    ],
    filters: &[
        Filter::same("name", "Filter by exact name"),
        Filter::same("name-like", "Filter by partial name"),
        Filter::switch("active", "is-active", "Only active job sites"),
        Filter::same("broker", "Filter by broker ID"),
        Filter::same("customer", "Filter by customer ID"),
        Filter::same("q", "Full-text search"),
        Filter::same("material-site", "Filter by material site ID"),
        Filter::same("is-stockpiling", "Filter by stockpiling (true/false)"),
        Filter::same("external-job-number", "Filter by external job number"),
    ],
    fields: &[
        Field::new("id", Source::Id),
        Field::text("name", "name"),
        Field::attr("is_active", "is-active", AttrKind::Bool),
        Field::joined("customer", "customer", &["company-name"]).optional(),
        Field::rel_id("customer_id", "customer").optional(),
        Field::joined("broker", "broker", &["company-name"]).optional(),
        Field::rel_id("broker_id", "broker").optional(),
        Field::text("address", "address").optional(),
    ],
    columns: &[
        Column::new("ID", &["id"]),
        Column::new("NAME", &["name"]).max(40),
        Column::new("ACTIVE", &["is_active"]),
        Column::new("CUSTOMER", &["customer", "customer_id"]).max(25),
        Column::new("BROKER", &["broker", "broker_id"]).max(25),
    ],
    inputs: &[
        Input::text("name", "Job site name").required(),
        Input::to_one("customer", "customers", "Customer ID").required(),
        Input::text("address", "Street address"),
        Input::attr("is-active", InputKind::Bool, "Active status (true/false)").default_value("true"),
        Input::attr("is-stockpiling", InputKind::Bool, "Stockpiling site (true/false)"),
        Input::text("contact-name", "On-site contact name"),
        Input::text("contact-phone-number", "On-site contact phone number"),
    ],
};

pub static JOB_SCHEDULE_SHIFTS: ResourceSpec = ResourceSpec {
    name: "job-schedule-shifts",
    aliases: &["job-schedule-shift", "shifts"],
    singular: "job schedule shift",
    plural: "job schedule shifts",
    about: "Scheduled shifts on a job",
    path: "/v1/job-schedule-shifts",
    verbs: Verb::ALL,
    default_sort: None,
    include: &["job-site", "customer", "broker"],
    fieldsets: &[
        (
            "job-schedule-shifts",
            "start-at,end-at,start-date,is-managed,cancelled-at,dispatch-instructions,job,job-site,customer,broker",
        ),
        ("job-sites", "name"),
        ("customers", "company-name"),
        ("brokers", "company-name"),
    ],
    filters: &[
        Filter::same("job", "Filter by job ID"),
        Filter::same("is-cancelled", "Filter by cancellation (true/false)"),
        Filter::same("is-managed", "Filter by managed status (true/false)"),
        Filter::same("customer", "Filter by customer ID"),
        Filter::same("broker", "Filter by broker ID"),
        Filter::same("start-date", "Filter by start date (YYYY-MM-DD)"),
        Filter::same("start-date-min", "Filter by minimum start date"),
        Filter::same("start-date-max", "Filter by maximum start date"),
        Filter::same("start-at-min", "Filter by minimum start time (ISO 8601)"),
        Filter::same("start-at-max", "Filter by maximum start time (ISO 8601)"),
    ],
    fields: &[
        Field::new("id", Source::Id),
        Field::attr("start_at", "start-at", AttrKind::DateTime).optional(),
        Field::attr("end_at", "end-at", AttrKind::DateTime).optional(),
        Field::attr("start_date", "start-date", AttrKind::Date).optional(),
        Field::attr("is_managed", "is-managed", AttrKind::Bool),
        Field::attr("cancelled_at", "cancelled-at", AttrKind::DateTime).optional(),
        Field::rel_id("job_id", "job").optional(),
        Field::joined("job_site", "job-site", &["name"]).optional(),
        Field::rel_id("job_site_id", "job-site").optional(),
        Field::joined("customer", "customer", &["company-name"]).optional(),
        Field::rel_id("customer_id", "customer").optional(),
        Field::joined("broker", "broker", &["company-name"]).optional(),
        Field::rel_id("broker_id", "broker").optional(),
        Field::text("dispatch_instructions", "dispatch-instructions").optional(),
    ],
    columns: &[
        Column::new("ID", &["id"]),
        Column::new("START AT", &["start_at"]),
        Column::new("END AT", &["end_at"]),
        Column::new("MANAGED", &["is_managed"]),
        Column::new("CANCELLED", &["cancelled_at"]),
        Column::new("JOB", &["job_id"]),
        Column::new("JOB SITE", &["job_site", "job_site_id"]).max(25),
        Column::new("CUSTOMER", &["customer", "customer_id"]).max(25),
        Column::new("BROKER", &["broker", "broker_id"]).max(25),
    ],
    inputs: &[
        Input::to_one("job", "jobs", "Job ID").required(),
        Input::text("start-at", "Shift start time (ISO 8601)").required(),
        Input::text("end-at", "Shift end time (ISO 8601)").required(),
        Input::text("dispatch-instructions", "Dispatch instructions"),
        Input::attr("is-planned-productive", InputKind::Bool, "Planned productive shift (true/false)"),
        Input::text("cancelled-at", "Cancelled at time (ISO 8601)"),
        Input::attr("is-flexible", InputKind::Bool, "Flexible shift (true/false)"),
        Input::attr("expected-material-transaction-count", InputKind::Integer, "Expected material transaction count"),
        Input::attr("expected-material-transaction-tons", InputKind::Number, "Expected material transaction tons"),
        Input::new("start-site-type", Target::PolyType { rel: "start-site" }, "Start site type (job-sites or material-sites)")
            .choices(START_SITE_TYPES),
        Input::new("start-site", Target::PolyId { rel: "start-site" }, "Start site ID (requires --start-site-type)"),
        Input::to_one("trailer-classification", "trailer-classifications", "Trailer classification ID"),
    ],
};
