//! Reminder text rendering.
//!
//! Message bodies are plain text with emoji, pushed as-is to the webhook.

use chrono::{DateTime, FixedOffset};
use rand::seq::SliceRandom;

use crate::clock::format_date_cn;
use crate::matcher::{TomorrowClass, UpcomingClass};

/// Pre-class reminder block. Wording shifts with the campus: same-campus
/// classes get the short "bring your notes" nudge, the other campus gets a
/// travel warning.
pub fn class_reminder(upcoming: &UpcomingClass) -> String {
    let course = &upcoming.course;
    let time = &upcoming.time;
    let cross_campus = course.campus == "中北";

    let campus_emoji = if cross_campus { "🚌" } else { "🏫" };
    let lead_text = lead_phrase(upcoming.lead_minutes);
    let headline = if cross_campus {
        format!("{campus_emoji} {lead_text}要去中北啦！")
    } else {
        format!("{campus_emoji} {lead_text}有课啦！")
    };
    let action = if cross_campus {
        "记得提前出发，路上注意安全！ 🚗"
    } else {
        "记得带好课本和笔记本哦~ 💪"
    };

    format!(
        "📚 上课提醒\n\n{headline}\n📖 课程：{name}\n⏰ 时间：{start}-{end} (第{periods}节)\n📍 地点：{room}\n🏫 校区：{campus}校区\n\n{action}",
        name = course.name,
        start = time.start,
        end = time.end,
        periods = course.period_label(),
        room = course.room(),
        campus = course.campus,
    )
}

fn lead_phrase(lead_minutes: u32) -> String {
    if lead_minutes >= 60 && lead_minutes % 60 == 0 {
        format!("{}小时后", lead_minutes / 60)
    } else {
        format!("{lead_minutes}分钟后")
    }
}

/// Nightly preview of tomorrow's schedule; an empty day gets a blessing
/// instead.
pub fn tomorrow_preview(classes: &[TomorrowClass]) -> String {
    let Some(first) = classes.first() else {
        return no_class_blessing();
    };

    let mut message = format!(
        "🌙 明日课程预告\n\n📅 明天 {} 的课程安排：\n\n",
        format_date_cn(first.date)
    );
    for class in classes {
        let course = &class.course;
        message.push_str(&format!(
            "📖 {}\n⏰ {}-{} (第{}节)\n📍 {} ({}校区)\n\n",
            course.name,
            class.time.start,
            class.time.end,
            course.period_label(),
            course.room(),
            course.campus,
        ));
    }
    message.push_str("早点休息，明天加油！🌟");
    message
}

/// One of three rotating "no class tomorrow" messages.
pub fn no_class_blessing() -> String {
    const BLESSINGS: [&str; 3] = [
        "🎉 明日无课\n\n明天没有课程安排哦！\n可以好好休息或者安排其他活动 😊\n\n享受这个轻松的一天吧！🌈",
        "🎊 明日自由日\n\n明天是没有课的一天！\n可以睡个懒觉或者做些喜欢的事情 🛌\n\n好好享受这个美好的日子！☀️",
        "🌟 明日休息日\n\n明天没有课程安排！\n是时候放松一下了 🧘\n\n愿你度过愉快的一天！🌸",
    ];
    BLESSINGS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(BLESSINGS[0])
        .to_string()
}

/// Fixed deployment-check message.
pub fn test_message(now: DateTime<FixedOffset>) -> String {
    format!(
        "🧪 课程提醒系统测试\n\n系统运行正常！\n当前时间: {}\n\n如果您收到这条消息，说明提醒系统已成功部署 ✅",
        now.format("%Y-%m-%d %H:%M:%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use classbell_core::Timetable;
    use crate::matcher::{tomorrow_classes, upcoming_classes};

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).expect("valid rfc3339")
    }

    #[test]
    fn test_class_reminder_same_campus() {
        let t = Timetable::default();
        let hits = upcoming_classes(&t, at("2025-09-15T09:20:00+08:00")).expect("match");
        let text = class_reminder(&hits[0]);
        assert!(text.contains("📚 上课提醒"));
        assert!(text.contains("30分钟后有课啦"));
        assert!(text.contains("课程：电子材料与器件"));
        assert!(text.contains("时间：9:50-11:25 (第3-4节)"));
        assert!(text.contains("地点：闵一教230"));
        assert!(text.contains("闵行校区"));
        assert!(text.contains("记得带好课本和笔记本哦"));
    }

    #[test]
    fn test_class_reminder_cross_campus() {
        let t = Timetable::default();
        let hits = upcoming_classes(&t, at("2025-09-15T11:00:00+08:00")).expect("match");
        let text = class_reminder(&hits[0]);
        assert!(text.contains("2小时后要去中北啦"));
        assert!(text.contains("记得提前出发，路上注意安全"));
        assert!(text.contains("🚌"));
    }

    #[test]
    fn test_tomorrow_preview_lists_courses_in_order() {
        let t = Timetable::default();
        let classes = tomorrow_classes(&t, at("2025-09-21T23:00:00+08:00")).expect("match");
        let text = tomorrow_preview(&classes);
        assert!(text.contains("🌙 明日课程预告"));
        assert!(text.contains("9月22日 (周一)"));
        let first = text.find("电子材料与器件").expect("first course present");
        let second = text.find("人工智能药物设计").expect("second course present");
        assert!(first < second);
        assert!(text.ends_with("早点休息，明天加油！🌟"));
    }

    #[test]
    fn test_tomorrow_preview_empty_is_blessing() {
        let text = tomorrow_preview(&[]);
        assert!(text.contains("明日无课") || text.contains("明日自由日") || text.contains("明日休息日"));
    }

    #[test]
    fn test_test_message_carries_timestamp() {
        let text = test_message(at("2025-09-15T09:20:00+08:00"));
        assert!(text.contains("2025-09-15 09:20:00"));
        assert!(text.contains("🧪"));
    }
}
