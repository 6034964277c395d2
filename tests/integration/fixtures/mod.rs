// Screenplay fixtures with known block output
// WHY: Golden-file testing requires deterministic input/output pairs for validation

/// Short two-scene screenplay touching every block type the corrector can produce
pub const SAMPLE_SCRIPT: &str = "بسم الله الرحمن الرحيم

مشهد 1
ليل - داخلي
البيت
نرى أحمد يجلس وحيداً في الصالة.
أحمد:
(بهدوء)
أين ذهب الجميع؟

• سارة: أنا هنا يا أحمد
قطع إلى:
مشهد 2 - نهار - خارجي
يدخل سامي مسرعاً.
سامي:
- ينظر حوله بقلق
";

/// Expected corrected blocks for SAMPLE_SCRIPT
/// Format: order<TAB>block-type<TAB>text<TAB>line_number
pub const SAMPLE_EXPECTED: &str = "0\tinvocation\tبسم الله الرحمن الرحيم\t1
1\taction\t\t2
2\tscene-header-number\tمشهد 1\t3
3\tscene-header-descriptor\tليل - داخلي\t4
4\tscene-location-only\tالبيت\t5
5\taction\tنرى أحمد يجلس وحيداً في الصالة.\t6
6\tcharacter-cue\tأحمد:\t7
7\tparenthetical\t(بهدوء)\t8
8\tdialogue\tأين ذهب الجميع؟\t9
9\taction\t\t10
10\tcharacter-cue\tسارة:\t11
11\tdialogue\tأنا هنا يا أحمد\t11
12\ttransition\tقطع إلى:\t12
13\tscene-header-combined\tمشهد 2 - نهار - خارجي\t13
14\taction\tيدخل سامي مسرعاً.\t14
15\tcharacter-cue\tسامي:\t15
16\taction\tينظر حوله بقلق\t16
";

/// Three scenes: 4 dialogue lines, 3 action lines
pub const THREE_SCENES: &str = "مشهد 1 - ليل - داخلي
نرى غرفة مظلمة.
أحمد:
من هناك؟
مشهد 2 - نهار - خارجي
يركض أحمد في الشارع.
سارة:
توقف!
انتظرني
مشهد 3
يجلس الجميع حول الطاولة.
أحمد:
أخيرا
";

/// Lines built to stress the classifier; none of them may panic or be dropped
pub const ADVERSARIAL_LINES: &[&str] = &[
    "",
    "   ",
    "\t\t",
    ":",
    "::::",
    "()",
    ")(",
    "((((",
    "م.",
    "مشهد",
    "مشهد 99999999999999999999999999999",
    "مشهد ٠",
    "{بسم الله الرحمن الرحيم",
    "•",
    "• :",
    "•:",
    "* أحمد:",
    "-",
    "— — —",
    "\u{200F}\u{200E}\u{FEFF}",
    "\u{0000}\u{0007}",
    "ـــــ",
    "ًٌٍَُِّْ",
    "🎬🎥",
    "CUT TO:",
    "Mixed عربي and English: نص",
    "(غير مغلق",
    "نرى",
    "يدخل",
    "أ:ب:ج:د",
];
