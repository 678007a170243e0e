//! Endpoint tables for both API versions

use super::{Endpoint, Payload, RangeParams, SummaryKind};

const V1_DATES: RangeParams = RangeParams::Dates {
    start: "start",
    end: "end",
};

const V2_DATES: RangeParams = RangeParams::Dates {
    start: "start_date",
    end: "end_date",
};

const fn daily(
    kind: SummaryKind,
    path: &'static str,
    payload: Payload,
    key: &'static str,
    range: RangeParams,
    paginated: bool,
) -> Endpoint {
    Endpoint {
        kind,
        path,
        payload,
        key_column: Some(key),
        range,
        paginated,
    }
}

pub(super) fn v1(kind: SummaryKind) -> Option<Endpoint> {
    let endpoint = match kind {
        SummaryKind::Sleep => daily(kind, "v1/sleep", Payload::Field("sleep"), "summary_date", V1_DATES, false),
        SummaryKind::Activity => daily(kind, "v1/activity", Payload::Field("activity"), "summary_date", V1_DATES, false),
        SummaryKind::Readiness => daily(kind, "v1/readiness", Payload::Field("readiness"), "summary_date", V1_DATES, false),
        SummaryKind::Bedtime => daily(kind, "v1/bedtime", Payload::Field("ideal_bedtimes"), "date", V1_DATES, false),
        SummaryKind::PersonalInfo => Endpoint {
            kind,
            path: "v1/userinfo",
            payload: Payload::Body,
            key_column: None,
            range: RangeParams::None,
            paginated: false,
        },
        _ => return None,
    };
    Some(endpoint)
}

pub(super) fn v2(kind: SummaryKind) -> Option<Endpoint> {
    const DATA: Payload = Payload::Field("data");
    let endpoint = match kind {
        SummaryKind::Sleep => daily(kind, "v2/usercollection/sleep", DATA, "day", V2_DATES, true),
        SummaryKind::Activity => daily(kind, "v2/usercollection/daily_activity", DATA, "timestamp", V2_DATES, true),
        SummaryKind::Readiness => daily(kind, "v2/usercollection/daily_readiness", DATA, "day", V2_DATES, true),
        SummaryKind::HeartRate => daily(
            kind,
            "v2/usercollection/heartrate",
            DATA,
            "timestamp",
            RangeParams::DateTimes {
                start: "start_datetime",
                end: "end_datetime",
            },
            true,
        ),
        SummaryKind::Sessions => daily(kind, "v2/usercollection/session", DATA, "day", V2_DATES, true),
        SummaryKind::Tags => daily(kind, "v2/usercollection/tag", DATA, "timestamp", V2_DATES, true),
        SummaryKind::Vo2Max => daily(kind, "v2/usercollection/vO2_max", DATA, "timestamp", V2_DATES, true),
        SummaryKind::Workouts => daily(kind, "v2/usercollection/workout", DATA, "day", V2_DATES, true),
        SummaryKind::CardiovascularAge => daily(
            kind,
            "v2/usercollection/daily_cardiovascular_age",
            DATA,
            "day",
            V2_DATES,
            true,
        ),
        SummaryKind::PersonalInfo => Endpoint {
            kind,
            path: "v2/usercollection/personal_info",
            payload: Payload::Body,
            key_column: None,
            range: RangeParams::None,
            paginated: false,
        },
        SummaryKind::Bedtime => return None,
    };
    Some(endpoint)
}
