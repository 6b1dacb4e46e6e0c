use crate::models::vehicle::Vehicle;
use crate::models::voice::View;

/// What a matched rule produces: the line to display and speak, and an
/// optional view to navigate to.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub response: String,
    pub view: Option<View>,
}

impl Reply {
    pub fn say(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            view: None,
        }
    }

    pub fn navigate(view: View, response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            view: Some(view),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    /// Matched rule name, `fallback` when nothing matched.
    pub rule: &'static str,
    pub response: String,
    pub view: Option<View>,
}

pub const FALLBACK_RULE: &str = "fallback";

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;
type Handler<C> = Box<dyn Fn(&C, &str) -> Reply + Send + Sync>;

pub struct CommandRule<C> {
    name: &'static str,
    predicate: Predicate,
    handler: Handler<C>,
}

impl<C> CommandRule<C> {
    /// `predicate` receives the lower-cased input, `handler` the original text.
    pub fn new(
        name: &'static str,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
        handler: impl Fn(&C, &str) -> Reply + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            predicate: Box::new(predicate),
            handler: Box::new(handler),
        }
    }

    /// Rule that fires when any of `keywords` occurs in the input.
    pub fn keywords(
        name: &'static str,
        keywords: &'static [&'static str],
        handler: impl Fn(&C, &str) -> Reply + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, contains_any(keywords), handler)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, lowered: &str) -> bool {
        (self.predicate)(lowered)
    }
}

pub fn contains_any(keywords: &'static [&'static str]) -> impl Fn(&str) -> bool + Send + Sync + 'static {
    move |text| keywords.iter().any(|k| text.contains(k))
}

/// Ordered rule list evaluated first-match-wins over lower-cased input.
pub struct RuleTable<C> {
    rules: Vec<CommandRule<C>>,
    fallback: Handler<C>,
}

impl<C> RuleTable<C> {
    pub fn new(fallback: impl Fn(&C, &str) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            rules: Vec::new(),
            fallback: Box::new(fallback),
        }
    }

    pub fn rule(mut self, rule: CommandRule<C>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(CommandRule::name).collect()
    }

    pub fn interpret(&self, ctx: &C, input: &str) -> CommandOutcome {
        let lowered = input.to_lowercase();
        let (rule, reply) = match self.rules.iter().find(|r| r.matches(&lowered)) {
            Some(rule) => (rule.name, (rule.handler)(ctx, input)),
            None => (FALLBACK_RULE, (self.fallback)(ctx, input)),
        };
        CommandOutcome {
            rule,
            response: reply.response,
            view: reply.view,
        }
    }
}

/// What navigation handlers can read about the console.
pub struct ConsoleContext {
    pub vehicles: Vec<Vehicle>,
}

/// The shell's voice navigation rules, in evaluation order.
pub fn navigation_rules() -> RuleTable<ConsoleContext> {
    RuleTable::<ConsoleContext>::new(|_, input| {
        Reply::say(format!(
            "I heard: \"{input}\". I can help you navigate the system. Try saying \"show vehicles\", \"check alerts\", \"schedule appointment\", or \"show analytics\"."
        ))
    })
    .rule(CommandRule::new(
        "vehicles",
        |text| text.contains("show") && (text.contains("vehicle") || text.contains("car")),
        |ctx: &ConsoleContext, _: &str| {
            let models: Vec<&str> = ctx.vehicles.iter().map(|v| v.model.as_str()).collect();
            Reply::navigate(
                View::Vehicles,
                format!("You have {} vehicles in your fleet: {}", models.len(), models.join(", ")),
            )
        },
    ))
    .rule(CommandRule::keywords("alerts", &["alert", "critical"], |_, _| {
        Reply::navigate(
            View::Dashboard,
            "Showing critical alerts. You have 2 active alerts: Brake temperature spike on vehicle VEH001 and Battery degradation on vehicle VEH002.",
        )
    }))
    .rule(CommandRule::keywords("scheduling", &["schedule", "appointment"], |_, _| {
        Reply::navigate(
            View::Scheduling,
            "Opening scheduling system. You can book maintenance appointments here.",
        )
    }))
    .rule(CommandRule::keywords("analytics", &["analytics", "report"], |_, _| {
        Reply::navigate(
            View::Analytics,
            "Opening analytics dashboard with comprehensive vehicle performance metrics.",
        )
    }))
    .rule(CommandRule::keywords(
        "car_owner",
        &["car owner", "my car", "owner dashboard", "my vehicle dashboard"],
        |_, _| {
            Reply::navigate(
                View::CarOwner,
                "Opening car owner dashboard. Access your personalized vehicle information and maintenance schedule.",
            )
        },
    ))
    .rule(CommandRule::keywords("security", &["security", "ueba"], |_, _| {
        Reply::navigate(
            View::Ueba,
            "Opening UEBA security monitoring system. All security parameters are normal.",
        )
    }))
    .rule(CommandRule::keywords("manufacturing", &["manufacturing", "defect"], |_, _| {
        Reply::navigate(
            View::Manufacturing,
            "Opening manufacturing insights dashboard. Analyzing recurring defects and patterns.",
        )
    }))
    .rule(CommandRule::keywords("feedback", &["feedback", "customer"], |_, _| {
        Reply::navigate(
            View::Feedback,
            "Opening customer feedback system. Current satisfaction rate is 94%.",
        )
    }))
    .rule(CommandRule::keywords("dashboard", &["dashboard", "home"], |_, _| {
        Reply::navigate(View::Dashboard, "Returning to main dashboard. All systems operational.")
    }))
    .rule(CommandRule::keywords("veh001", &["veh001", "swift"], |_, _| {
        Reply::say("2020 Maruti Swift - Vehicle ID VEH001. Owner: Mr. Rajesh Sharma. Status: Active with one critical alert about brake temperature.")
    }))
    .rule(CommandRule::keywords("veh002", &["veh002", "nexon"], |_, _| {
        Reply::say("2022 Tata Nexon EV - Vehicle ID VEH002. Owner: Ms. Priya Patel. Status: Active with battery degradation warning.")
    }))
    .rule(CommandRule::keywords("veh003", &["veh003", "creta"], |_, _| {
        Reply::say("2021 Hyundai Creta - Vehicle ID VEH003. Owner: Mr. Amit Kumar. Status: All systems normal.")
    }))
    .rule(CommandRule::keywords("help", &["help", "what can you do"], |_, _| {
        Reply::say("I can help you with: viewing vehicles, checking alerts, scheduling appointments, viewing analytics, security monitoring, manufacturing insights, and customer feedback. Just ask!")
    }))
}
