//! UI strings in English and Arabic

use crate::context::Locale;
use crate::nodes::{NodeKind, NodeStatus};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// key -> (english, arabic)
static STRINGS: Lazy<HashMap<&'static str, (&'static str, &'static str)>> = Lazy::new(|| {
    HashMap::from([
        ("app.title", ("FlowCanvas", "فلو كانفاس")),
        // Toolbar
        ("toolbar.zoom_in", ("Zoom in", "تكبير")),
        ("toolbar.zoom_out", ("Zoom out", "تصغير")),
        ("toolbar.reset", ("Reset view", "إعادة ضبط العرض")),
        ("toolbar.fit", ("Fit to screen", "ملاءمة الشاشة")),
        ("toolbar.center", ("Center view", "توسيط العرض")),
        ("toolbar.snap", ("Snap to grid", "المحاذاة للشبكة")),
        ("toolbar.grid", ("Show grid", "إظهار الشبكة")),
        ("toolbar.pan_tool", ("Pan tool", "أداة التحريك")),
        ("toolbar.select_tool", ("Select tool", "أداة التحديد")),
        ("toolbar.sidebar", ("Node palette", "لوحة العقد")),
        ("toolbar.theme", ("Toggle theme", "تبديل المظهر")),
        ("toolbar.language", ("العربية", "English")),
        // File menu
        ("file.menu", ("File", "ملف")),
        ("file.new", ("New", "جديد")),
        ("file.open", ("Open…", "فتح…")),
        ("file.save", ("Save", "حفظ")),
        ("file.save_as", ("Save as…", "حفظ باسم…")),
        ("file.untitled", ("Untitled", "بدون عنوان")),
        // Palette
        ("palette.title", ("Nodes", "العقد")),
        ("palette.hint", ("Drag a node onto the canvas", "اسحب عقدة إلى اللوحة")),
        // Canvas
        ("canvas.empty", ("Drop nodes here to start a workflow", "أسقط العقد هنا لبدء سير العمل")),
        ("canvas.auto_moved", ("Moved to a free spot", "نُقلت إلى مكان فارغ")),
        // Node editor
        ("node.properties", ("Properties", "الخصائص")),
        ("node.label", ("Label", "الاسم")),
        ("node.description", ("Description", "الوصف")),
        ("node.status", ("Status", "الحالة")),
        ("node.locked", ("Locked", "مقفلة")),
        ("node.duplicate", ("Duplicate", "تكرار")),
        ("node.delete", ("Delete", "حذف")),
        ("node.connect", ("Connect to…", "ربط بـ…")),
        // Delete confirmation
        ("delete.title", ("Delete node", "حذف العقدة")),
        ("delete.confirm", ("Delete this node and its connections?", "حذف هذه العقدة وروابطها؟")),
        ("delete.locked", ("This node is locked", "هذه العقدة مقفلة")),
        ("delete.single", ("Select a single node to delete", "حدد عقدة واحدة للحذف")),
        ("common.yes", ("Yes", "نعم")),
        ("common.no", ("No", "لا")),
        // Assistant
        ("chat.title", ("Assistant", "المساعد")),
        ("chat.placeholder", ("Ask about your workflow…", "اسأل عن سير العمل…")),
        ("chat.send", ("Send", "إرسال")),
        ("chat.thinking", ("Thinking…", "جارٍ التفكير…")),
        ("chat.clear", ("Clear", "مسح")),
        ("chat.archive", ("Archive", "أرشفة")),
        ("chat.analyze", ("Analyze workflow", "تحليل سير العمل")),
        // Workflow analysis
        ("analysis.prompt", ("Please review my canvas", "راجع لوحتي من فضلك")),
        ("analysis.no_trigger", ("There is no trigger yet, so nothing starts this workflow.", "لا يوجد مشغل بعد، لذا لا شيء يبدأ سير العمل.")),
        ("analysis.no_output", ("There is no output node yet.", "لا توجد عقدة مخرج بعد.")),
        ("analysis.unconnected", ("Unconnected nodes:", "عقد غير مرتبطة:")),
    ])
});

/// Looks up a UI string; unknown keys come back unchanged
pub fn tr<'a>(locale: Locale, key: &'a str) -> &'a str {
    match STRINGS.get(key) {
        Some(&(english, arabic)) => match locale {
            Locale::English => english,
            Locale::Arabic => arabic,
        },
        None => {
            log::debug!("Missing translation for '{}'", key);
            key
        }
    }
}

/// Display name for a node kind, also used as the default node label
pub fn kind_label(kind: NodeKind, locale: Locale) -> &'static str {
    match (kind, locale) {
        (NodeKind::Trigger, Locale::English) => "Trigger",
        (NodeKind::Trigger, Locale::Arabic) => "مشغل",
        (NodeKind::Action, Locale::English) => "Action",
        (NodeKind::Action, Locale::Arabic) => "إجراء",
        (NodeKind::Condition, Locale::English) => "Condition",
        (NodeKind::Condition, Locale::Arabic) => "شرط",
        (NodeKind::Data, Locale::English) => "Data",
        (NodeKind::Data, Locale::Arabic) => "بيانات",
        (NodeKind::Schedule, Locale::English) => "Schedule",
        (NodeKind::Schedule, Locale::Arabic) => "جدولة",
        (NodeKind::Integration, Locale::English) => "Integration",
        (NodeKind::Integration, Locale::Arabic) => "تكامل",
        (NodeKind::Output, Locale::English) => "Output",
        (NodeKind::Output, Locale::Arabic) => "مخرج",
    }
}

pub fn status_label(status: NodeStatus, locale: Locale) -> &'static str {
    match (status, locale) {
        (NodeStatus::Idle, Locale::English) => "Idle",
        (NodeStatus::Idle, Locale::Arabic) => "خامل",
        (NodeStatus::Running, Locale::English) => "Running",
        (NodeStatus::Running, Locale::Arabic) => "قيد التشغيل",
        (NodeStatus::Success, Locale::English) => "Success",
        (NodeStatus::Success, Locale::Arabic) => "نجاح",
        (NodeStatus::Error, Locale::English) => "Error",
        (NodeStatus::Error, Locale::Arabic) => "خطأ",
        (NodeStatus::Warning, Locale::English) => "Warning",
        (NodeStatus::Warning, Locale::Arabic) => "تحذير",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tr_switches_language() {
        assert_eq!(tr(Locale::English, "chat.send"), "Send");
        assert_eq!(tr(Locale::Arabic, "chat.send"), "إرسال");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(tr(Locale::Arabic, "nope.missing"), "nope.missing");
    }

    #[test]
    fn test_every_kind_and_status_has_both_labels() {
        for kind in NodeKind::ALL {
            assert!(!kind_label(kind, Locale::English).is_empty());
            assert_ne!(kind_label(kind, Locale::English), kind_label(kind, Locale::Arabic));
        }
        for status in NodeStatus::ALL {
            assert_ne!(status_label(status, Locale::English), status_label(status, Locale::Arabic));
        }
    }
}
