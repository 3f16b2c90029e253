/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! approximate string matching with a weighted ratio (WRatio) score. The score is the best of
//! a plain ratio, a partial (best substring window) ratio and token sort/set ratios, where the
//! partial and token based scores are scaled down so that exact matches still rank highest

const TOKEN_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.9;
const LONG_PARTIAL_SCALE: f64 = 0.6;

/// lower case alphanumeric words separated by single spaces
pub fn normalize (s: &str)->String {
    s.chars()
        .map( |c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

fn lcs_len (a: &[char], b: &[char])->usize {
    let mut prev: Vec<usize> = vec![0; b.len()+1];
    let mut cur: Vec<usize> = vec![0; b.len()+1];

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            cur[j] = if a[i-1] == b[j-1] { prev[j-1] + 1 } else { prev[j].max( cur[j-1]) };
        }
        std::mem::swap( &mut prev, &mut cur);
    }
    prev[b.len()]
}

fn char_ratio (a: &[char], b: &[char])->f64 {
    let len_sum = a.len() + b.len();
    if len_sum == 0 { return 0.0 }
    (200.0 * lcs_len( a, b) as f64 / len_sum as f64).round()
}

fn char_partial_ratio (a: &[char], b: &[char])->f64 {
    let (short,long) = if a.len() <= b.len() { (a,b) } else { (b,a) };
    if short.is_empty() { return 0.0 }

    let mut best = 0.0;
    for window in long.windows( short.len()) {
        let r = char_ratio( short, window);
        if r > best { best = r }
        if best >= 100.0 { break }
    }
    best
}

fn chars (s: &str)->Vec<char> { s.chars().collect() }

/// indel similarity `2*lcs / (len(a)+len(b))` in percent, rounded
pub fn ratio (a: &str, b: &str)->u8 {
    char_ratio( &chars(a), &chars(b)) as u8
}

/// best [`ratio`] of the shorter string against all equally long windows of the longer one
pub fn partial_ratio (a: &str, b: &str)->u8 {
    char_partial_ratio( &chars(a), &chars(b)) as u8
}

fn sorted_tokens (s: &str)->String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort();
    tokens.join(" ")
}

fn token_sort (a: &str, b: &str, score: fn(&str,&str)->u8)->f64 {
    score( &sorted_tokens(a), &sorted_tokens(b)) as f64
}

fn token_set (a: &str, b: &str, score: fn(&str,&str)->u8)->f64 {
    let ta: std::collections::BTreeSet<&str> = a.split_whitespace().collect();
    let tb: std::collections::BTreeSet<&str> = b.split_whitespace().collect();

    let common = ta.intersection( &tb).copied().collect::<Vec<&str>>().join(" ");
    let only_a = ta.difference( &tb).copied().collect::<Vec<&str>>().join(" ");
    let only_b = tb.difference( &ta).copied().collect::<Vec<&str>>().join(" ");

    let with_a = format!("{common} {only_a}").trim().to_string();
    let with_b = format!("{common} {only_b}").trim().to_string();

    let mut best = score( &with_a, &with_b);
    if !common.is_empty() {
        best = best.max( score( &common, &with_a)).max( score( &common, &with_b));
    }
    best as f64
}

/// weighted similarity score in [0..100] of the normalized strings (100 means identical).
/// Substring matches are only considered if one string is at least 1.5 times longer than the other,
/// which gives "Dixie" vs "Dixie Fire" a score of 90
pub fn similarity (a: &str, b: &str)->u8 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() { return 0 }

    let base = ratio( &a, &b) as f64;
    let (la, lb) = (a.chars().count() as f64, b.chars().count() as f64);
    let len_ratio = la.max(lb) / la.min(lb);

    let score = if len_ratio < 1.5 {
        base
            .max( token_sort( &a, &b, ratio) * TOKEN_SCALE)
            .max( token_set( &a, &b, ratio) * TOKEN_SCALE)
    } else {
        let scale = if len_ratio > 8.0 { LONG_PARTIAL_SCALE } else { PARTIAL_SCALE };
        base
            .max( partial_ratio( &a, &b) as f64 * scale)
            .max( token_sort( &a, &b, partial_ratio) * TOKEN_SCALE * scale)
            .max( token_set( &a, &b, partial_ratio) * TOKEN_SCALE * scale)
    };
    score.round() as u8
}

/// the choice with the highest similarity score, if that score is at least `score_cutoff`.
/// Ties are resolved in favor of the first choice
pub fn best_match<'a,I> (query: &str, choices: I, score_cutoff: u8)->Option<(&'a str,u8)> where I: IntoIterator<Item=&'a str> {
    let mut best: Option<(&'a str,u8)> = None;
    for choice in choices {
        let score = similarity( query, choice);
        if score >= score_cutoff && best.map( |(_,s)| score > s).unwrap_or(true) {
            best = Some( (choice,score) );
        }
    }
    best
}
