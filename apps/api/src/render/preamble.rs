// Static document frame. Independent of CV content.

/// Packages the preamble loads unconditionally or probes for. The toolchain
/// check reports which of these the local TeX installation provides.
pub const REQUIRED_PACKAGES: &[&str] = &[
    "latexsym",
    "fullpage",
    "titlesec",
    "color",
    "verbatim",
    "enumitem",
    "hyperref",
    "fancyhdr",
    "babel",
    "tabularx",
    "marvosym",
    "fontawesome5",
    "multicol",
];

pub const PREAMBLE: &str = r#"\documentclass[letterpaper,11pt]{article}

\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
\usepackage{latexsym}
\usepackage[empty]{fullpage}
\usepackage{titlesec}
\usepackage[usenames,dvipsnames]{color}
\usepackage{verbatim}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\usepackage{fancyhdr}
\usepackage[english]{babel}
\usepackage{tabularx}

% Optional packages; icon macros degrade to nothing when missing
\IfFileExists{marvosym.sty}{\usepackage{marvosym}}{}
\IfFileExists{fontawesome5.sty}{\usepackage{fontawesome5}}{
  \newcommand{\faPhone}{}
  \newcommand{\faEnvelope}{}
  \newcommand{\faLinkedin}{}
  \newcommand{\faGlobe}{}
  \newcommand{\faGithub}{}
}
\IfFileExists{multicol.sty}{
  \usepackage{multicol}
  \setlength{\multicolsep}{-3.0pt}
  \setlength{\columnsep}{-1pt}
}{}
\IfFileExists{glyphtounicode.tex}{\input{glyphtounicode}\pdfgentounicode=1}{}

\pagestyle{fancy}
\fancyhf{}
\fancyfoot{}
\renewcommand{\headrulewidth}{0pt}
\renewcommand{\footrulewidth}{0pt}

% Margins
\addtolength{\oddsidemargin}{-0.6in}
\addtolength{\evensidemargin}{-0.5in}
\addtolength{\textwidth}{1.19in}
\addtolength{\topmargin}{-.7in}
\addtolength{\textheight}{1.4in}

\urlstyle{same}

\raggedbottom
\raggedright
\setlength{\tabcolsep}{0in}

% Section headings
\titleformat{\section}{
  \vspace{-4pt}\scshape\raggedright\large\bfseries
}{}{0em}{}[\color{black}\titlerule \vspace{-5pt}]

% Resume macros
\newcommand{\resumeItem}[1]{
  \item\small{
    {#1 \vspace{-2pt}}
  }
}

\newcommand{\resumeSubheading}[4]{
  \vspace{-2pt}\item
    \begin{tabular*}{1.0\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{\parbox[t]{0.7\textwidth}{\raggedright #1}} & \textbf{\small\parbox[t]{0.25\textwidth}{\raggedleft #2}} \\
      \textit{\small\parbox[t]{0.7\textwidth}{\raggedright #3}} & \textit{\small\parbox[t]{0.25\textwidth}{\raggedleft #4}} \\
    \end{tabular*}\vspace{-7pt}
}

\newcommand{\projectEntry}[2]{
  \vspace{-2pt}\item
    \begin{tabular*}{1.0\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{#1} & \textbf{\small #2} \\
    \end{tabular*}\vspace{-7pt}
}

\newcommand{\resumeParagraph}[1]{
  \item\small{
    \begin{flushleft}
      #1
    \end{flushleft}
    \vspace{-10pt}
  }
}

\newcommand{\resumeSubHeadingListStart}{\begin{itemize}[leftmargin=0.0in, label={}]}
\newcommand{\resumeSubHeadingListEnd}{\end{itemize}}
\newcommand{\resumeItemListStart}{\begin{itemize}}
\newcommand{\resumeItemListEnd}{\end{itemize}\vspace{-5pt}}

\begin{document}
"#;

pub const POSTAMBLE: &str = "\\end{document}\n";
