use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref NON_LATIN: Regex = Regex::new(r"[^a-z\s]").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","across","after","afterwards","again","against","all","almost","alone","along","already","also",
            "although","always","am","among","amongst","amoungst","amount","an","and","another","any","anyhow","anyone","anything",
            "anyway","anywhere","are","around","as","at",
            "back","be","became","because","become","becomes","becoming","been","before","beforehand","behind","being","below",
            "beside","besides","between","beyond","bill","both","bottom","but","by",
            "call","can","cannot","cant","co","con","could","couldnt","cry",
            "de","describe","detail","do","done","down","due","during",
            "each","eg","eight","either","eleven","else","elsewhere","empty","enough","etc","even","ever","every","everyone",
            "everything","everywhere","except",
            "few","fifteen","fifty","fill","find","fire","first","five","for","former","formerly","forty","found","four","from",
            "front","full","further",
            "get","give","go",
            "had","has","hasnt","have","he","hence","her","here","hereafter","hereby","herein","hereupon","hers","herself","him",
            "himself","his","how","however","hundred",
            "i","ie","if","in","inc","indeed","interest","into","is","it","its","itself",
            "keep",
            "last","latter","latterly","least","less","ltd",
            "made","many","may","me","meanwhile","might","mill","mine","more","moreover","most","mostly","move","much","must",
            "my","myself",
            "name","namely","neither","never","nevertheless","next","nine","no","nobody","none","noone","nor","not","nothing",
            "now","nowhere",
            "of","off","often","on","once","one","only","onto","or","other","others","otherwise","our","ours","ourselves","out",
            "over","own",
            "part","per","perhaps","please","put",
            "rather","re",
            "same","see","seem","seemed","seeming","seems","serious","several","she","should","show","side","since","sincere",
            "six","sixty","so","some","somehow","someone","something","sometime","sometimes","somewhere","still","such","system",
            "take","ten","than","that","the","their","them","themselves","then","thence","there","thereafter","thereby",
            "therefore","therein","thereupon","these","they","thick","thin","third","this","those","though","three","through",
            "throughout","thru","thus","to","together","too","top","toward","towards","twelve","twenty","two",
            "un","under","until","up","upon","us",
            "very","via",
            "was","we","well","were","what","whatever","when","whence","whenever","where","whereafter","whereas","whereby",
            "wherein","whereupon","wherever","whether","which","while","whither","who","whoever","whole","whom","whose","why",
            "will","with","within","without","would",
            "yet","you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// Tokens of this many characters or fewer are dropped.
pub const MIN_TOKEN_LEN: usize = 2;

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Clean raw text into a space-separated token string: lowercase, everything outside `a-z` and
/// whitespace blanked, stop words and short tokens removed. Absent input gives an empty string.
pub fn normalize(text: Option<&str>) -> String {
    let Some(text) = text else { return String::new() };
    let lowered = text.to_lowercase();
    let latin = NON_LATIN.replace_all(&lowered, " ");
    latin
        .split_whitespace()
        .filter(|t| t.len() > MIN_TOKEN_LEN && !is_stopword(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split an already normalized string into its tokens.
pub fn tokens(clean: &str) -> Vec<&str> { clean.split_whitespace().collect() }

/// Contiguous n-grams of `tokens` for every n in `min..=max`, shortest grams first.
pub fn ngrams(tokens: &[&str], min: usize, max: usize) -> Vec<String> {
    let min = min.max(1);
    let mut grams = Vec::new();
    for n in min..=max {
        if n > tokens.len() { break; }
        grams.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    grams
}
