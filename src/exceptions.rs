//! Godan verbs ending in る whose reading looks ichidan.

/// Known godan verbs that would otherwise be classified ichidan because the
/// kana before their final る is on the e- or i-row.
pub const GODAN_RU_EXCEPTIONS: &[&str] = &[
    // -iru
    "入る",
    "要る",
    "煎る",
    "炒る",
    "切る",
    "伐る",
    "斬る",
    "知る",
    "散る",
    "参る",
    "走る",
    "限る",
    "握る",
    "遮る",
    "過る",
    "漲る",
    "迸る",
    "滾る",
    "陥る",
    "千切る",
    "契る",
    "齧る",
    "詰る",
    "捩じる",
    "捻じる",
    "攀じる",
    "弄る",
    "野次る",
    "愚痴る",
    "混じる",
    "交じる",
    "軋る",
    "謗る",
    "誹る",
    "毟る",
    "罵る",
    "脂ぎる",
    "滅入る",
    "気に入る",
    "恥じ入る",
    "寝入る",
    "聞き入る",
    "見入る",
    "立ち入る",
    "押し入る",
    "取り入る",
    "恐れ入る",
    "痛み入る",
    "消え入る",
    "染み入る",
    "込み入る",
    "横切る",
    "裏切る",
    "区切る",
    "仕切る",
    "張り切る",
    "思い切る",
    "打ち切る",
    "踏み切る",
    "乗り切る",
    "言い切る",
    "使い切る",
    "押し切る",
    "振り切る",
    "見切る",
    "締め切る",
    "売り切る",
    "割り切る",
    "見知る",
    "思い知る",
    "飛び散る",
    "口走る",
    "突っ走る",
    "先走る",
    "見限る",
    "見縊る",
    // -eru
    "帰る",
    "返る",
    "還る",
    "孵る",
    "蹴る",
    "減る",
    "滑る",
    "喋る",
    "練る",
    "照る",
    "焦る",
    "嘲る",
    "翻る",
    "覆る",
    "蘇る",
    "甦る",
    "茂る",
    "湿る",
    "捻る",
    "抓る",
    "畝る",
    "競る",
    "侍る",
    "耽る",
    "阿る",
    "猛る",
    "哮る",
    "翳る",
    "陰る",
    "火照る",
    "熱る",
    "駄弁る",
    "生き返る",
    "振り返る",
    "見返る",
    "裏返る",
    "静まり返る",
    "呆れ返る",
    "立ち返る",
    "若返る",
    "寝返る",
    "煮え返る",
    "沸き返る",
    "持ち帰る",
    "連れ帰る",
    "立ち帰る",
    "読み耽る",
    "遊び耽る",
    "生い茂る",
    "照り返る",
    "跳ね返る",
    "舞い戻る",
    "出しゃばる",
    "罷る",
    "せびる",
    "ねじる",
    "いじる",
    "しゃべる",
    "すべる",
];

/// Whether `surface` is a known godan verb that looks ichidan.
pub fn is_godan_exception(surface: &str) -> bool {
    GODAN_RU_EXCEPTIONS.contains(&surface)
}

#[cfg(test)]
mod exceptions_tests {
    use super::{is_godan_exception, GODAN_RU_EXCEPTIONS};
    use std::collections::HashSet;

    #[test]
    fn common_lookalikes_are_listed() {
        for surface in ["入る", "走る", "帰る", "切る", "知る", "要る", "滑る"] {
            assert!(is_godan_exception(surface), "{surface}");
        }
        assert!(!is_godan_exception("食べる"));
        assert!(!is_godan_exception("見る"));
    }

    #[test]
    fn entries_are_unique_and_end_in_ru() {
        let unique: HashSet<_> = GODAN_RU_EXCEPTIONS.iter().collect();
        assert_eq!(unique.len(), GODAN_RU_EXCEPTIONS.len());
        assert!(GODAN_RU_EXCEPTIONS.iter().all(|verb| verb.ends_with('る')));
    }
}
