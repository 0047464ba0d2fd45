// src/noyau/jetons.rs

use super::expr::Fonction;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,
    E,

    // Fonctions + variables (tout ce qui n’est pas pi / e / opérateur / nombre)
    // NOTE: le parse (RPN->Expr) décidera si c’est une fonction (sin/cos/...) ou une variable.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    // Moins unaire (décidé par `marquer_unaires`, jamais par tokenize)
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 0.5, .5, 1e-3, 2.5E4)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - π ou pi, e
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - √ (équivaut à ident("sqrt"))
/// - multiplication implicite : 2x, 3sin(x), (x+1)(x-1), x(x+1)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        // Opérateurs
        let op = match c {
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' | '·' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            _ => None,
        };
        if let Some(t) = op {
            out.push(t);
            i += 1;
            continue;
        }

        if c == 'π' {
            out.push(Tok::Pi);
            i += 1;
            continue;
        }

        // Racine carrée unicode : √  => ident("sqrt")
        if c == '√' {
            out.push(Tok::Ident("sqrt".to_string()));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            match w.as_str() {
                "pi" => out.push(Tok::Pi),
                "e" => out.push(Tok::E),
                _ => out.push(Tok::Ident(w)),
            }
            continue;
        }

        // Nombre décimal : chiffres [. chiffres] [e|E [+|-] chiffres]
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }

            // exposant seulement s’il est bien formé (sinon “2e” = 2·e)
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    while j < chars.len() && chars[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }

            let txt: String = chars[start..i].iter().collect();
            let v: f64 = txt
                .parse()
                .map_err(|_| format!("nombre invalide: '{txt}'"))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(marquer_unaires(inserer_mul_implicite(out)))
}

fn est_fonction(t: &Tok) -> bool {
    matches!(t, Tok::Ident(nom) if Fonction::depuis_nom(nom).is_some())
}

/// Faut-il un `*` entre ces deux jetons ?
fn mul_implicite(cur: &Tok, next: &Tok) -> bool {
    let cur_valeur = match cur {
        Tok::Num(_) | Tok::Pi | Tok::E | Tok::RPar => true,
        // une fonction suivie de '(' est un appel, pas un produit
        Tok::Ident(_) => !est_fonction(cur),
        _ => false,
    };
    if !cur_valeur {
        return false;
    }

    match next {
        Tok::Pi | Tok::E | Tok::Ident(_) | Tok::LPar => true,
        // x2 ou )2
        Tok::Num(_) => !matches!(cur, Tok::Num(_)),
        _ => false,
    }
}

/// Insère les multiplications implicites : 2x -> 2 * x, (a)(b) -> (a) * (b).
fn inserer_mul_implicite(tokens: Vec<Tok>) -> Vec<Tok> {
    if !tokens.windows(2).any(|w| mul_implicite(&w[0], &w[1])) {
        return tokens;
    }

    let mut out = Vec::with_capacity(tokens.len() * 3 / 2);
    let mut it = tokens.into_iter().peekable();
    while let Some(cur) = it.next() {
        let besoin = it.peek().is_some_and(|next| mul_implicite(&cur, next));
        out.push(cur);
        if besoin {
            out.push(Tok::Star);
        }
    }
    out
}

/// Moins unaire : un '-' qui n’arrive PAS après une valeur devient Neg.
/// Un '+' unaire est simplement retiré.
fn marquer_unaires(tokens: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());

    for t in tokens {
        let apres_valeur = matches!(
            out.last(),
            Some(Tok::Num(_) | Tok::Pi | Tok::E | Tok::RPar)
        ) || matches!(out.last(), Some(tok @ Tok::Ident(_)) if !est_fonction(tok));

        match t {
            Tok::Minus if !apres_valeur => out.push(Tok::Neg),
            Tok::Plus if !apres_valeur => {}
            other => out.push(other),
        }
    }

    out
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Pi => "π".to_string(),
            Tok::E => "e".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
