//! Chinese display names for the breed labels emitted by the classifier.
//!
//! Keys are the cleaned, lowercased English labels (see
//! [`crate::results::clean_label`]).

pub const BREED_NAMES: &[(&str, &str)] = &[
    ("golden retriever", "金毛寻回犬"),
    ("labrador retriever", "拉布拉多寻回犬"),
    ("german shepherd", "德国牧羊犬"),
    ("french bulldog", "法国斗牛犬"),
    ("bulldog", "斗牛犬"),
    ("poodle", "贵宾犬"),
    ("beagle", "比格犬"),
    ("rottweiler", "罗威纳犬"),
    ("yorkshire terrier", "约克夏梗"),
    ("boxer", "拳师犬"),
    ("dachshund", "腊肠犬"),
    ("siberian husky", "西伯利亚哈士奇"),
    ("great dane", "大丹犬"),
    ("doberman", "杜宾犬"),
    ("australian shepherd", "澳大利亚牧羊犬"),
    ("miniature schnauzer", "迷你雪纳瑞"),
    ("cavalier king charles spaniel", "查理士王小猎犬"),
    ("shih tzu", "西施犬"),
    ("boston terrier", "波士顿梗"),
    ("pomeranian", "博美犬"),
    ("havanese", "哈瓦那犬"),
    ("shetland sheepdog", "设得兰牧羊犬"),
    ("pembroke welsh corgi", "威尔士柯基犬"),
    ("brittany", "布列塔尼犬"),
    ("english springer spaniel", "英国跳猎犬"),
    ("bernese mountain dog", "伯恩山犬"),
    ("cocker spaniel", "可卡犬"),
    ("border collie", "边境牧羊犬"),
    ("vizsla", "维兹拉犬"),
    ("basset hound", "巴吉度猎犬"),
    ("mastiff", "獒犬"),
    ("chihuahua", "吉娃娃"),
    ("collie", "柯利牧羊犬"),
    ("maltese", "马尔济斯犬"),
    ("weimaraner", "魏玛猎犬"),
    ("newfoundland", "纽芬兰犬"),
    ("bichon frise", "比雄犬"),
    ("rhodesian ridgeback", "罗得西亚脊背犬"),
    ("west highland white terrier", "西高地白梗"),
    ("shiba inu", "柴犬"),
    ("papillon", "蝴蝶犬"),
    ("bull terrier", "牛头梗"),
    ("saint bernard", "圣伯纳犬"),
    ("akita", "秋田犬"),
    ("alaskan malamute", "阿拉斯加雪橇犬"),
    ("bloodhound", "寻血猎犬"),
    ("pug", "巴哥犬"),
    ("chow chow", "松狮犬"),
    ("samoyed", "萨摩耶犬"),
    ("chinese shar pei", "沙皮犬"),
    ("american staffordshire terrier", "美国斯塔福郡梗"),
    ("dalmatian", "大麦町犬（斑点狗）"),
    ("afghan hound", "阿富汗猎犬"),
    ("standard schnauzer", "标准雪纳瑞"),
    ("giant schnauzer", "巨型雪纳瑞"),
    ("whippet", "惠比特犬"),
    ("italian greyhound", "意大利灵缇"),
    ("english cocker spaniel", "英国可卡犬"),
    ("airedale terrier", "刚毛猎狐梗"),
    ("cairn terrier", "凯恩梗"),
    ("soft coated wheaten terrier", "爱尔兰软毛梗"),
    ("irish setter", "爱尔兰雪达犬"),
    ("gordon setter", "戈登雪达犬"),
    ("australian cattle dog", "澳大利亚牧牛犬"),
    ("portuguese water dog", "葡萄牙水犬"),
    ("irish wolfhound", "爱尔兰猎狼犬"),
    ("saluki", "萨路基猎犬"),
    ("border terrier", "边境梗"),
];

/// Look up the localized name for a cleaned, lowercased breed label.
pub fn localized_name(cleaned: &str) -> Option<&'static str> {
    BREED_NAMES
        .iter()
        .find(|(en, _)| *en == cleaned)
        .map(|(_, zh)| *zh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_breed() {
        assert_eq!(localized_name("labrador retriever"), Some("拉布拉多寻回犬"));
        assert_eq!(localized_name("shiba inu"), Some("柴犬"));
    }

    #[test]
    fn unknown_breed_is_none() {
        assert_eq!(localized_name("miniature poodle"), None);
        assert_eq!(localized_name(""), None);
    }
}
